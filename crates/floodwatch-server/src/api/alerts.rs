use crate::api::{cached_json, error_response};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use floodwatch_common::types::AlertItem;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Stored flood alerts are capped to keep the response small.
const ALERT_LIST_LIMIT: u64 = 50;

/// One stored flood alert, sanitized so every field has a value.
#[derive(Serialize, ToSchema)]
pub struct AlertRecord {
    pub id: String,
    pub region: String,
    pub alert_level: String,
    pub rainfall_mm: f64,
    pub message: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

/// Recorded flood alerts, newest first, at most 50.
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alerts",
    responses(
        (status = 200, description = "Stored flood alerts, newest first", body = Vec<AlertRecord>),
        (status = 500, description = "Database error", body = crate::api::ApiError)
    )
)]
async fn get_alerts(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_flood_alerts(ALERT_LIST_LIMIT).await {
        Ok(rows) => {
            let items: Vec<AlertRecord> = rows
                .into_iter()
                .map(|a| AlertRecord {
                    id: a.id,
                    region: a.region.unwrap_or_else(|| "Unknown".to_string()),
                    alert_level: a.alert_level.unwrap_or_else(|| "Unknown".to_string()),
                    rainfall_mm: a.rainfall_mm.unwrap_or(0.0),
                    message: a
                        .message
                        .unwrap_or_else(|| "No details available".to_string()),
                    priority: a.priority.unwrap_or_else(|| "Normal".to_string()),
                    created_at: a.created_at,
                })
                .collect();
            cached_json(items, 60)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list flood alerts");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// The live merged alert feed (disaster feed + discharge forecast), as of
/// the last poll cycle.
#[utoipa::path(
    get,
    path = "/api/alerts/feed",
    tag = "Alerts",
    responses(
        (status = 200, description = "Current merged alert feed", body = Vec<AlertItem>)
    )
)]
async fn get_alert_feed(State(state): State<AppState>) -> impl IntoResponse {
    let feed = state.alert_feed.read().await.clone();
    Json(feed)
}

#[derive(Deserialize, ToSchema)]
struct BroadcastRequest {
    message: String,
    /// Target region; omitted or "all" reaches every subscriber.
    #[serde(default)]
    region: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct BroadcastResponse {
    success: bool,
    recipients: usize,
}

/// Send an SMS flood alert to subscribers and record it.
#[utoipa::path(
    post,
    path = "/api/alerts/broadcast",
    tag = "Alerts",
    request_body = BroadcastRequest,
    responses(
        (status = 200, description = "Alert broadcast and recorded", body = BroadcastResponse),
        (status = 400, description = "Empty message or no subscribers", body = crate::api::ApiError),
        (status = 502, description = "SMS gateway failure", body = crate::api::ApiError),
        (status = 503, description = "SMS service not configured", body = crate::api::ApiError)
    )
)]
async fn broadcast_alert(
    State(state): State<AppState>,
    Json(req): Json<BroadcastRequest>,
) -> impl IntoResponse {
    if req.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Message is required");
    }

    let Some(sms) = &state.sms else {
        tracing::error!("SMS credentials not configured");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "SMS service not configured");
    };

    let region = req
        .region
        .as_deref()
        .filter(|r| !r.is_empty() && *r != "all");

    let phones = match state.store.list_subscriber_phones(region).await {
        Ok(phones) => phones,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list SMS subscribers");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    if phones.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No subscribers found");
    }

    let text = format!("[FLOOD ALERT] {}", req.message.trim());
    if let Err(e) = sms.send_message(&phones, &text).await {
        tracing::error!(error = %e, "SMS broadcast failed");
        return error_response(StatusCode::BAD_GATEWAY, "SMS sending failed");
    }

    // Record the broadcast; delivery already succeeded, so a storage
    // failure only loses history.
    if let Err(e) = state
        .store
        .insert_flood_alert(&floodwatch_storage::NewFloodAlert {
            region: region.map(str::to_string),
            message: Some(req.message.trim().to_string()),
            ..Default::default()
        })
        .await
    {
        tracing::error!(error = %e, "Failed to record broadcast alert");
    }

    Json(BroadcastResponse {
        success: true,
        recipients: phones.len(),
    })
    .into_response()
}

pub fn alert_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_alerts))
        .routes(routes!(get_alert_feed))
        .routes(routes!(broadcast_alert))
}
