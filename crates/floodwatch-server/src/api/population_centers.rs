use crate::api::{cached_json, error_response};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use floodwatch_map::geojson::is_feature_collection;
use std::path::Path;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Population centres GeoJSON, served verbatim from the data directory.
#[utoipa::path(
    get,
    path = "/api/population-centers",
    tag = "Map",
    responses(
        (status = 200, description = "Population centres feature collection"),
        (status = 500, description = "File unreadable", body = crate::api::ApiError)
    )
)]
async fn get_population_centers(State(state): State<AppState>) -> impl IntoResponse {
    let path = Path::new(&state.config.data_dir)
        .join("namibia")
        .join("population_centers.geojson");

    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read population centers");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch population centers data",
            );
        }
    };

    match serde_json::from_str::<serde_json::Value>(&contents) {
        Ok(data) => {
            if !is_feature_collection(&data) {
                tracing::warn!(path = %path.display(), "Population centers file is not a FeatureCollection");
            }
            cached_json(data, 3600)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Population centers file is not valid JSON");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch population centers data",
            )
        }
    }
}

pub fn population_center_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_population_centers))
}
