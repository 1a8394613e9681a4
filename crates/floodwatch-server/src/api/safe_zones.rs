use crate::api::{cached_json, error_response};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use floodwatch_map::geojson::point_coordinates;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Reasonable cap for map markers.
const SAFE_ZONE_LIMIT: u64 = 100;

/// One safe evacuation zone as rendered on the map.
#[derive(Serialize, ToSchema)]
pub struct SafeZone {
    pub name: String,
    /// Shelter capacity in persons, never negative.
    pub capacity: i32,
    pub longitude: f64,
    pub latitude: f64,
}

/// Safe evacuation zones with validated coordinates, at most 100.
///
/// Rows whose stored location is not a valid 2-element GeoJSON point are
/// dropped with a logged warning.
#[utoipa::path(
    get,
    path = "/api/safe-zones",
    tag = "SafeZones",
    responses(
        (status = 200, description = "Safe zones with valid coordinates", body = Vec<SafeZone>),
        (status = 500, description = "Database error", body = crate::api::ApiError)
    )
)]
async fn get_safe_zones(State(state): State<AppState>) -> impl IntoResponse {
    let rows = match state.store.list_safe_zones(SAFE_ZONE_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list safe zones");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    let zones: Vec<SafeZone> = rows
        .into_iter()
        .filter_map(|z| {
            let name = z.name.unwrap_or_else(|| "Unnamed Shelter".to_string());
            let coords = z.location.as_deref().and_then(point_coordinates);
            match coords {
                Some((longitude, latitude)) => Some(SafeZone {
                    name,
                    capacity: z.capacity.unwrap_or(0).max(0),
                    longitude,
                    latitude,
                }),
                None => {
                    tracing::warn!(name = %name, "Invalid coordinates for safe zone");
                    None
                }
            }
        })
        .collect();

    cached_json(zones, 300)
}

pub fn safe_zone_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_safe_zones))
}
