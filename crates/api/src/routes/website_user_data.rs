use axum::{extract::State, routing::get, Json, Router};
use visitor_locator_core::{location::LocationRecord, store::upsert_item};

use crate::error::ApiResult;
use crate::extractors::ClientIp;
use crate::state::AppState;

/// Visitor location routes. `/api/...` mirrors the function-host route prefix.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/website_user_data",
            get(website_user_data).post(website_user_data),
        )
        .route(
            "/api/website_user_data",
            get(website_user_data).post(website_user_data),
        )
}

/// Resolve the caller's IP, enrich it with a geolocation lookup, and upsert
/// the result keyed by IP.
async fn website_user_data(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
) -> ApiResult<Json<LocationRecord>> {
    tracing::info!(client_ip = %ip, "Processing request to fetch location details");

    let details = state.geolocation().lookup(&ip).await.inspect_err(|err| {
        tracing::error!(client_ip = %ip, error = %err, "Failed to fetch IP details");
    })?;

    let record = LocationRecord::new(ip, details);
    upsert_item(state.store(), &record.id, &record).await?;
    tracing::info!(client_ip = %record.ip, location = %record.location, "Location record upserted");

    Ok(Json(record))
}
