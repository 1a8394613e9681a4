use crate::api::{cached_json, error_response};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use floodwatch_common::types::WeatherReport;
use floodwatch_feeds::weather::reshape;
use serde::Deserialize;
use utoipa_axum::{router::OpenApiRouter, routes};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
struct WeatherParams {
    /// Latitude; defaults to Oshakati
    #[param(required = false)]
    lat: Option<String>,
    /// Longitude; defaults to Oshakati
    #[param(required = false)]
    lon: Option<String>,
}

/// Parse a user-supplied coordinate, falling back to the configured
/// default when absent. NaN and infinities count as invalid.
fn parse_coord(raw: Option<&str>, default: f64) -> Option<f64> {
    match raw {
        None => Some(default),
        Some(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

/// Current weather for a coordinate, reshaped from the upstream provider.
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "Weather",
    params(WeatherParams),
    responses(
        (status = 200, description = "Current weather snapshot", body = WeatherReport),
        (status = 400, description = "Invalid coordinates", body = crate::api::ApiError),
        (status = 502, description = "Malformed upstream payload", body = crate::api::ApiError),
        (status = 503, description = "Weather provider unavailable", body = crate::api::ApiError)
    )
)]
async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> impl IntoResponse {
    let cfg = &state.config.weather;
    let (lat, lon) = match (
        parse_coord(params.lat.as_deref(), cfg.default_lat),
        parse_coord(params.lon.as_deref(), cfg.default_lon),
    ) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid latitude or longitude parameters",
            );
        }
    };

    let Some(provider) = &state.weather else {
        tracing::error!("Weather API key not configured");
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Weather service temporarily unavailable",
        );
    };

    match provider.current(lat, lon).await {
        Ok(payload) => match reshape(&payload, Utc::now()) {
            Ok(report) => cached_json(report, 300),
            Err(e) => {
                tracing::error!(error = %e, "Invalid weather API response structure");
                error_response(StatusCode::BAD_GATEWAY, "Weather data format error")
            }
        },
        Err(e) => {
            tracing::error!(lat, lon, error = %e, "Weather API error");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Weather data temporarily unavailable",
            )
        }
    }
}

pub fn weather_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_weather))
}
