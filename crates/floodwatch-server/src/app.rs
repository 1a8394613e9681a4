use crate::state::AppState;
use crate::{api, logging};
use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "floodwatch API",
        description = "Flood-awareness backend for Northern Namibia",
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Weather", description = "Current weather proxy"),
        (name = "Alerts", description = "Flood alerts, live feed, SMS broadcast"),
        (name = "SafeZones", description = "Safe evacuation zones"),
        (name = "Reports", description = "Community photo reports"),
        (name = "Map", description = "Map layers and static geodata"),
        (name = "Assistant", description = "Flood assistant")
    )
)]
struct ApiDoc;

pub fn build_http_app(state: AppState) -> Router {
    let (router, api_spec) = api::routes().split_for_parts();

    let mut spec = ApiDoc::openapi();
    spec.merge(api_spec);

    let cors = if state.config.cors_allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    router
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api/openapi.json", spec))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging))
}
