//! Domain types and outbound collaborators for the visitor locator service.

pub mod client_ip;
pub mod geolocation;
pub mod location;
pub mod store;
