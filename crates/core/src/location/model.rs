use serde::{Deserialize, Serialize};

/// Placeholder for any field the geolocation service did not report.
pub const UNKNOWN: &str = "Unknown";

/// Place information for an IP address as reported by a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDetails {
    pub city: String,
    pub region: String,
    pub country: String,
}

impl LocationDetails {
    /// Build details from optional lookup fields, filling gaps with `"Unknown"`.
    pub fn from_parts(
        city: Option<String>,
        region: Option<String>,
        country: Option<String>,
    ) -> Self {
        Self {
            city: city.unwrap_or_else(|| UNKNOWN.to_string()),
            region: region.unwrap_or_else(|| UNKNOWN.to_string()),
            country: country.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }

    /// Human-readable `"{city}, {region}, {country}"`.
    pub fn display_location(&self) -> String {
        format!("{}, {}, {}", self.city, self.region, self.country)
    }
}

/// Stored visitor location, one document per IP.
/// The document id is the IP itself, so repeat visits replace the old record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub ip: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub location: String,
}

impl LocationRecord {
    pub fn new(ip: impl Into<String>, details: LocationDetails) -> Self {
        let ip = ip.into();
        let location = details.display_location();
        Self {
            id: ip.clone(),
            ip,
            city: details.city,
            region: details.region,
            country: details.country,
            location,
        }
    }
}
