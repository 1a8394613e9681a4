pub mod alerts;
pub mod assistant;
pub mod map_layers;
pub mod population_centers;
pub mod reports;
pub mod safe_zones;
pub mod weather;

use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Error body shared by every route: `{"error": "<message>"}`.
#[derive(Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiError {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// A 200 JSON response with a public cache-control directive.
pub fn cached_json<T: Serialize>(data: T, max_age_secs: u32) -> Response {
    (
        StatusCode::OK,
        [(
            header::CACHE_CONTROL,
            format!("public, max-age={max_age_secs}"),
        )],
        Json(data),
    )
        .into_response()
}

/// Service health
#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service version
    version: String,
    /// Uptime in seconds
    uptime_secs: i64,
    /// Overall status
    status: String,
}

/// Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = (Utc::now() - state.start_time).num_seconds();
    Json(HealthResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
        status: "ok".to_string(),
    })
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health))
        .merge(weather::weather_routes())
        .merge(alerts::alert_routes())
        .merge(safe_zones::safe_zone_routes())
        .merge(population_centers::population_center_routes())
        .merge(assistant::assistant_routes())
        .merge(reports::report_routes())
        .merge(map_layers::map_layer_routes())
}
