use anyhow::Result;
use chrono::Utc;
use floodwatch_ai::{Assistant, GrokProvider};
use floodwatch_feeds::{GdacsClient, OpenMeteoFloodClient, OpenWeatherClient, WeatherProvider};
use floodwatch_notify::{ChannelRoute, NotificationChannel, NotificationManager, SmsChannel, WebhookChannel};
use floodwatch_storage::FloodStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use floodwatch_server::app;
use floodwatch_server::config::{self, ServerConfig};
use floodwatch_server::scheduler::AlertPollScheduler;
use floodwatch_server::state::AppState;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  floodwatch-server [config.toml]    Start the server");
}

#[tokio::main]
async fn main() -> Result<()> {
    floodwatch_common::id::init(1, 1);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(|s| s.as_str()) {
        Some("--help" | "-h") => {
            print_usage();
            Ok(())
        }
        arg => {
            let config_path = arg.unwrap_or("config/server.toml");
            run_server(config_path).await
        }
    }
}

async fn run_server(config_path: &str) -> Result<()> {
    let config = config::ServerConfig::load(config_path)?;

    tracing::info!(
        http_port = config.http_port,
        data_dir = %config.data_dir,
        "floodwatch-server starting"
    );

    std::fs::create_dir_all(&config.data_dir)?;
    let db_url = config.database.connection_url(&config.data_dir);
    let store = Arc::new(FloodStore::new(&db_url).await?);

    // Each provider needs its own secret: a missing one disables that
    // route, never the whole server.
    let weather: Option<Arc<dyn WeatherProvider>> = match config.weather.resolved_api_key() {
        Some(key) => Some(Arc::new(OpenWeatherClient::new(
            &key,
            config.weather.base_url.clone(),
        ))),
        None => {
            tracing::warn!("No weather API key configured; /api/weather will return 503");
            None
        }
    };

    let assistant: Option<Arc<dyn Assistant>> = if config.assistant.enabled {
        match config.assistant.resolved_api_key() {
            Some(key) => Some(Arc::new(GrokProvider::new(
                key,
                config.assistant.model.clone(),
                config.assistant.base_url.clone(),
                config.assistant.timeout_secs,
                config.assistant.max_tokens,
                config.assistant.temperature,
            )?)),
            None => {
                tracing::warn!("No assistant API key configured; /api/assistant will return 503");
                None
            }
        }
    } else {
        tracing::info!("Assistant disabled");
        None
    };

    let sms = if config.sms.enabled {
        match (
            config.sms.resolved_username(),
            config.sms.resolved_api_key(),
        ) {
            (Some(username), Some(api_key)) => Some(Arc::new(SmsChannel::new(
                config.sms.gateway_url.clone(),
                &username,
                &api_key,
                &config.sms.sender_id,
                config.notify.sms_recipients.clone(),
            ))),
            _ => {
                tracing::warn!("SMS credentials not configured; broadcasts will return 503");
                None
            }
        }
    } else {
        tracing::info!("SMS channel disabled");
        None
    };

    let notifier = Arc::new(build_notifier(&config));

    let state = AppState {
        store,
        weather,
        assistant,
        sms,
        alert_feed: Arc::new(RwLock::new(Vec::new())),
        config: Arc::new(config.clone()),
        start_time: Utc::now(),
    };

    // HTTP server
    let http_addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let app = app::build_http_app(state.clone());
    let http_listener = tokio::net::TcpListener::bind(http_addr).await?;
    let http_server = async move { axum::serve(http_listener, app).await };

    // Alert poll scheduler
    let poll_handle = if config.alert_poll.enabled {
        let scheduler = AlertPollScheduler::new(
            Arc::new(GdacsClient::new(config.alert_poll.gdacs_url.clone())),
            Arc::new(OpenMeteoFloodClient::new(
                config.alert_poll.flood_api_base_url.clone(),
            )),
            notifier,
            state.alert_feed.clone(),
            config.alert_poll.clone(),
        );
        Some(tokio::spawn(async move {
            scheduler.run().await;
        }))
    } else {
        tracing::info!("Alert poll scheduler disabled");
        None
    };

    tracing::info!(http = %http_addr, "Server started");

    tokio::select! {
        result = http_server => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server error");
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("Shutting down gracefully");
        }
    }

    if let Some(h) = poll_handle {
        h.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Channels and severity routes for scheduler-driven notifications:
/// webhooks relay every item at the configured threshold, the SMS route
/// only fires for its static recipient list.
fn build_notifier(config: &ServerConfig) -> NotificationManager {
    let mut channels: Vec<Box<dyn NotificationChannel>> = Vec::new();
    let mut routes = Vec::new();

    if !config.notify.webhook_urls.is_empty() {
        let min_severity = config
            .notify
            .webhook_min_severity
            .parse()
            .unwrap_or(floodwatch_common::types::Severity::Low);
        routes.push(ChannelRoute {
            min_severity,
            channel_index: channels.len(),
        });
        channels.push(Box::new(WebhookChannel::new(
            config.notify.webhook_urls.clone(),
        )));
    }

    if config.sms.enabled && !config.notify.sms_recipients.is_empty() {
        if let (Some(username), Some(api_key)) = (
            config.sms.resolved_username(),
            config.sms.resolved_api_key(),
        ) {
            let min_severity = config
                .notify
                .sms_min_severity
                .parse()
                .unwrap_or(floodwatch_common::types::Severity::High);
            routes.push(ChannelRoute {
                min_severity,
                channel_index: channels.len(),
            });
            channels.push(Box::new(SmsChannel::new(
                config.sms.gateway_url.clone(),
                &username,
                &api_key,
                &config.sms.sender_id,
                config.notify.sms_recipients.clone(),
            )));
        }
    }

    NotificationManager::new(channels, routes)
}
