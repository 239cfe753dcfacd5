pub mod health;
pub mod website_user_data;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(website_user_data::routes())
        .with_state(state)
}
