//! Client IP resolution from forwarding headers.
//!
//! Sources are consulted in priority order:
//! - `X-Forwarded-For` (leftmost entry of a proxy chain)
//! - `X-Real-IP`
//! - the transport-level peer address
//!
//! The resolved value is not validated as an IP literal; any non-empty string
//! is passed through.

use std::net::IpAddr;

pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Resolve the originating client IP.
///
/// Blank header values count as absent. Returns `None` when nothing usable is
/// left after taking the first comma-separated entry and trimming it.
pub fn resolve_client_ip(
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
    remote_addr: Option<IpAddr>,
) -> Option<String> {
    let raw = non_blank(forwarded_for)
        .or_else(|| non_blank(real_ip))
        .map(str::to_string)
        .or_else(|| remote_addr.map(|addr| addr.to_string()))?;

    first_in_chain(&raw).map(str::to_string)
}

/// Take the leftmost entry of a comma-separated proxy chain.
fn first_in_chain(value: &str) -> Option<&str> {
    let first = value.split(',').next().unwrap_or_default().trim();
    (!first.is_empty()).then_some(first)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
