use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use visitor_locator_core::client_ip::{resolve_client_ip, FORWARDED_FOR_HEADER, REAL_IP_HEADER};

use crate::error::ApiError;

/// Originating client IP, taken from `X-Forwarded-For`, `X-Real-IP`, or the
/// peer address recorded by `into_make_service_with_connect_info`.
/// Rejects with [`ApiError::NoClientIp`] when none yields a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let remote = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        match resolve_client_ip(
            header_str(&parts.headers, FORWARDED_FOR_HEADER),
            header_str(&parts.headers, REAL_IP_HEADER),
            remote,
        ) {
            Some(ip) => {
                tracing::info!(client_ip = %ip, "Client IP resolved");
                Ok(ClientIp(ip))
            }
            None => {
                tracing::warn!("Client IP could not be determined");
                Err(ApiError::NoClientIp)
            }
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
