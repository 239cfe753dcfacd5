use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde::Deserialize;

use super::{GeoLookup, LookupError};
use crate::location::LocationDetails;

/// Client for ipinfo-style JSON APIs: `GET {base}/{ip}/json?token={token}`.
#[derive(Debug, Clone)]
pub struct IpInfoClient {
    http: Client,
    base_url: String,
    token: String,
}

/// Subset of the lookup payload we care about. Absent or null keys stay `None`.
#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl IpInfoClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn endpoint(&self, ip: &str) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), ip)
    }
}

#[async_trait]
impl GeoLookup for IpInfoClient {
    async fn lookup(&self, ip: &str) -> Result<LocationDetails, LookupError> {
        let response = self
            .http
            .get(self.endpoint(ip))
            .query(&[("token", self.token.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status {
                ip: ip.to_string(),
                status: status.as_u16(),
            });
        }

        let body: IpInfoResponse = response.json().await?;
        tracing::debug!(ip, "geolocation lookup succeeded");
        Ok(LocationDetails::from_parts(body.city, body.region, body.country))
    }
}
