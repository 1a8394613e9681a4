use crate::api::{cached_json, error_response};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

const REPORT_LIMIT: u64 = 100;

/// One approved community photo report.
#[derive(Serialize, ToSchema)]
pub struct CommunityReport {
    pub id: String,
    pub photo_url: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// Approved community reports, newest first. Unapproved submissions are
/// never served.
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "Approved community reports", body = Vec<CommunityReport>),
        (status = 500, description = "Database error", body = crate::api::ApiError)
    )
)]
async fn get_reports(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_approved_reports(REPORT_LIMIT).await {
        Ok(rows) => {
            let reports: Vec<CommunityReport> = rows
                .into_iter()
                .map(|r| CommunityReport {
                    id: r.id,
                    photo_url: r.photo_url,
                    description: r.description.unwrap_or_default(),
                    latitude: r.latitude,
                    longitude: r.longitude,
                    created_at: r.created_at,
                })
                .collect();
            cached_json(reports, 60)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list community reports");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

pub fn report_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_reports))
}
