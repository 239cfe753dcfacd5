pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use crate::config::AppConfig;
use crate::state::AppState;

/// Router with all routes and middleware layers applied.
pub fn build_app(state: AppState, config: &AppConfig) -> Router {
    routes::build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer(&config.cors_allowed_origins))
}
