use chrono::Utc;
use floodwatch_alert::{AggregatorConfig, AlertAggregator};
use floodwatch_common::types::AlertItem;
use floodwatch_feeds::{DisasterFeed, FloodForecast};
use floodwatch_notify::NotificationManager;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::time::{interval, Duration};

use crate::config::AlertPollConfig;

/// Drives the alert aggregation cycle on a fixed interval.
///
/// Each tick is an independent best-effort fetch: no backoff, no retry
/// before the next tick. Either feed may fail and the cycle proceeds with
/// the partial result; when both fail the previous snapshot is left in
/// place rather than being replaced by an empty placeholder.
pub struct AlertPollScheduler {
    disaster: Arc<dyn DisasterFeed>,
    forecast: Arc<dyn FloodForecast>,
    aggregator: Mutex<AlertAggregator>,
    notifier: Arc<NotificationManager>,
    alert_feed: Arc<RwLock<Vec<AlertItem>>>,
    config: AlertPollConfig,
}

impl AlertPollScheduler {
    pub fn new(
        disaster: Arc<dyn DisasterFeed>,
        forecast: Arc<dyn FloodForecast>,
        notifier: Arc<NotificationManager>,
        alert_feed: Arc<RwLock<Vec<AlertItem>>>,
        config: AlertPollConfig,
    ) -> Self {
        let aggregator = AlertAggregator::new(AggregatorConfig {
            region_keywords: config.region_keywords.clone(),
            discharge_threshold: config.discharge_threshold,
            max_recent: config.max_recent,
        });
        Self {
            disaster,
            forecast,
            aggregator: Mutex::new(aggregator),
            notifier,
            alert_feed,
            config,
        }
    }

    pub async fn run(&self) {
        tracing::info!(
            tick_secs = self.config.tick_secs,
            discharge_threshold = self.config.discharge_threshold,
            "Alert poll scheduler started"
        );

        let mut tick = interval(Duration::from_secs(self.config.tick_secs));
        loop {
            tick.tick().await;
            self.poll_once().await;
        }
    }

    /// One aggregation cycle: fetch both feeds, merge, publish the
    /// snapshot, notify the new items.
    pub async fn poll_once(&self) {
        let entries = match self.disaster.fetch().await {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!(error = %e, "Disaster feed fetch failed");
                None
            }
        };

        let discharge = match self
            .forecast
            .daily_discharge(self.config.latitude, self.config.longitude)
            .await
        {
            Ok(series) => Some(series),
            Err(e) => {
                tracing::warn!(error = %e, "Flood forecast fetch failed");
                None
            }
        };

        if entries.is_none() && discharge.is_none() {
            tracing::error!("All alert feeds unreachable, keeping previous snapshot");
            return;
        }

        let (new_items, snapshot) = {
            let mut aggregator = self
                .aggregator
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let new_items = aggregator.ingest(
                entries.as_deref().unwrap_or(&[]),
                discharge.as_ref(),
                Utc::now(),
            );
            (new_items, aggregator.snapshot())
        };

        *self.alert_feed.write().await = snapshot;

        for item in &new_items {
            self.notifier.notify(item).await;
        }
    }
}
