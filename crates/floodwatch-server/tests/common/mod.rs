#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use floodwatch_ai::Assistant;
use floodwatch_feeds::error::{FeedError, Result as FeedResult};
use floodwatch_feeds::weather::CurrentConditions;
use floodwatch_feeds::WeatherProvider;
use floodwatch_server::app;
use floodwatch_server::config::ServerConfig;
use floodwatch_server::state::AppState;
use floodwatch_storage::FloodStore;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::RwLock;
use tower::util::ServiceExt;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub state: AppState,
    pub app: axum::Router,
}

/// A weather provider answering with a fixed JSON payload, or failing.
pub struct StubWeather {
    pub payload: Option<Value>,
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn current(&self, _lat: f64, _lon: f64) -> FeedResult<CurrentConditions> {
        match &self.payload {
            Some(payload) => Ok(serde_json::from_value(payload.clone())?),
            None => Err(FeedError::HttpError {
                provider: "openweather",
                status: 500,
            }),
        }
    }
}

pub struct StubAssistant {
    pub answer: String,
}

#[async_trait]
impl Assistant for StubAssistant {
    fn provider(&self) -> &str {
        "stub"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.answer.clone())
    }
}

pub async fn build_test_context(
    weather: Option<Arc<dyn WeatherProvider>>,
    assistant: Option<Arc<dyn Assistant>>,
) -> Result<TestContext> {
    floodwatch_common::id::init(1, 1);

    let temp_dir = tempfile::tempdir()?;
    let db_url = format!(
        "sqlite://{}/floodwatch.db?mode=rwc",
        temp_dir.path().display()
    );
    let store = Arc::new(FloodStore::new(&db_url).await?);

    let config = ServerConfig {
        data_dir: temp_dir.path().to_string_lossy().to_string(),
        ..ServerConfig::default()
    };

    let state = AppState {
        store,
        weather,
        assistant,
        sms: None,
        alert_feed: Arc::new(RwLock::new(Vec::new())),
        config: Arc::new(config),
        start_time: Utc::now(),
    };

    let app = app::build_http_app(state.clone());

    Ok(TestContext {
        temp_dir,
        state,
        app,
    })
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get_with_headers(
    app: &axum::Router,
    uri: &str,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, value)
}

pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn parse_body<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}
