use crate::api::cached_json;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use floodwatch_map::{layer_catalog, LayerDescriptor};
use utoipa_axum::{router::OpenApiRouter, routes};

/// The product layer catalog: sources and paint parameters shared by all
/// map front ends. The rainfall raster appears only when a weather key is
/// configured.
#[utoipa::path(
    get,
    path = "/api/map/layers",
    tag = "Map",
    responses(
        (status = 200, description = "Layer catalog", body = Vec<LayerDescriptor>)
    )
)]
async fn get_map_layers(State(state): State<AppState>) -> impl IntoResponse {
    let key = state.config.weather.resolved_api_key();
    cached_json(layer_catalog(key.as_deref()), 3600)
}

pub fn map_layer_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_map_layers))
}
