pub mod model;

pub use model::{LocationDetails, LocationRecord, UNKNOWN};
