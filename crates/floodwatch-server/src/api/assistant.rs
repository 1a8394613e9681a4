use crate::api::error_response;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use floodwatch_ai::prompt::build_assistant_prompt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

#[derive(Deserialize, ToSchema)]
struct AssistantRequest {
    /// The user question. `query` is accepted as an alias.
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    query: Option<String>,
}

impl AssistantRequest {
    fn text(&self) -> Option<&str> {
        self.prompt
            .as_deref()
            .or(self.query.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Serialize, ToSchema)]
struct AssistantResponse {
    response: String,
    timestamp: DateTime<Utc>,
}

/// Ask the flood assistant a question.
#[utoipa::path(
    post,
    path = "/api/assistant",
    tag = "Assistant",
    request_body = AssistantRequest,
    responses(
        (status = 200, description = "Assistant answer", body = AssistantResponse),
        (status = 400, description = "Missing prompt", body = crate::api::ApiError),
        (status = 502, description = "Provider failure", body = crate::api::ApiError),
        (status = 503, description = "Assistant not configured", body = crate::api::ApiError)
    )
)]
async fn ask_assistant(
    State(state): State<AppState>,
    Json(req): Json<AssistantRequest>,
) -> impl IntoResponse {
    let Some(query) = req.text() else {
        return error_response(StatusCode::BAD_REQUEST, "Prompt is required");
    };

    let Some(assistant) = &state.assistant else {
        tracing::error!("Assistant API key not configured");
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Assistant temporarily unavailable",
        );
    };

    let prompt = build_assistant_prompt(query);
    match assistant.complete(&prompt).await {
        Ok(response) => Json(AssistantResponse {
            response,
            timestamp: Utc::now(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(provider = assistant.provider(), error = %e, "Assistant request failed");
            error_response(StatusCode::BAD_GATEWAY, "Failed to process AI request")
        }
    }
}

/// Legacy route path kept for deployed clients.
#[utoipa::path(
    post,
    path = "/api/grok",
    tag = "Assistant",
    request_body = AssistantRequest,
    responses(
        (status = 200, description = "Assistant answer", body = AssistantResponse),
        (status = 400, description = "Missing prompt", body = crate::api::ApiError),
        (status = 502, description = "Provider failure", body = crate::api::ApiError),
        (status = 503, description = "Assistant not configured", body = crate::api::ApiError)
    )
)]
async fn ask_assistant_legacy(
    state: State<AppState>,
    req: Json<AssistantRequest>,
) -> impl IntoResponse {
    ask_assistant(state, req).await
}

pub fn assistant_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(ask_assistant))
        .routes(routes!(ask_assistant_legacy))
}
