use std::sync::Arc;

use visitor_locator_core::{geolocation::GeoLookup, store::DocumentStore};

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Arc<dyn DocumentStore>,
    geolocation: Arc<dyn GeoLookup>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, geolocation: Arc<dyn GeoLookup>) -> Self {
        Self {
            inner: Arc::new(InnerState { store, geolocation }),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    pub fn geolocation(&self) -> &dyn GeoLookup {
        self.inner.geolocation.as_ref()
    }
}
