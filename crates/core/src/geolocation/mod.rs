//! IP geolocation lookups.

pub mod ipinfo;

use async_trait::async_trait;
use thiserror::Error;

use crate::location::LocationDetails;

pub use ipinfo::IpInfoClient;

#[derive(Debug, Error)]
pub enum LookupError {
    /// The service answered with something other than 200.
    #[error("geolocation service returned {status} for {ip}")]
    Status { ip: String, status: u16 },

    /// Transport failure, timeout, or an unreadable body.
    #[error("geolocation request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Resolves an IP address to approximate place details.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    async fn lookup(&self, ip: &str) -> Result<LocationDetails, LookupError>;
}
