use crate::config::ServerConfig;
use chrono::{DateTime, Utc};
use floodwatch_ai::Assistant;
use floodwatch_common::types::AlertItem;
use floodwatch_feeds::WeatherProvider;
use floodwatch_notify::SmsChannel;
use floodwatch_storage::FloodStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared per-process state handed to every route handler.
///
/// Providers are `Option` because each one needs its own secret: a missing
/// key disables that route with a 503 at first use rather than failing
/// startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FloodStore>,
    pub weather: Option<Arc<dyn WeatherProvider>>,
    pub assistant: Option<Arc<dyn Assistant>>,
    pub sms: Option<Arc<SmsChannel>>,
    /// Latest aggregator snapshot, replaced wholesale each poll cycle.
    pub alert_feed: Arc<RwLock<Vec<AlertItem>>>,
    pub config: Arc<ServerConfig>,
    pub start_time: DateTime<Utc>,
}
