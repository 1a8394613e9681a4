use chrono::{DateTime, Utc};
use floodwatch_common::types::{AlertItem, AlertSource, DischargeSeries, FeedEntry, Severity};
use std::collections::HashSet;

use crate::severity::{classify_severity, matches_region};

/// Fixed identifier of the placeholder entry shown when no feed produced
/// anything. Stable so it never re-notifies.
const PLACEHOLDER_ID: &str = "no-active-alerts";

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Case-insensitive substrings matched against entry title/description.
    pub region_keywords: Vec<String>,
    /// Daily river discharge above this value (m³/s) synthesizes a
    /// high-severity forecast alert.
    pub discharge_threshold: f64,
    /// Recent-list cap.
    pub max_recent: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            region_keywords: vec!["namibia".to_string()],
            discharge_threshold: 400.0,
            max_recent: 20,
        }
    }
}

/// Stateful merge of the disaster feed and the discharge forecast.
///
/// Holds the capped recent list plus the set of identifiers already
/// surfaced, so each tick only reports newly-arrived items.
pub struct AlertAggregator {
    config: AggregatorConfig,
    recent: Vec<AlertItem>,
    seen: HashSet<String>,
}

impl AlertAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            config,
            recent: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// The current recent list, newest-relevance first (synthesized
    /// forecast alert leads when present).
    pub fn snapshot(&self) -> Vec<AlertItem> {
        self.recent.clone()
    }

    /// Merge one poll cycle's worth of feed data and return the items not
    /// seen in any previous cycle. Either input may be missing when its
    /// fetch failed; the merge proceeds with what succeeded.
    ///
    /// The placeholder entry produced for an empty merge participates in
    /// the snapshot but is never reported as new, so quiet periods do not
    /// generate notifications.
    pub fn ingest(
        &mut self,
        entries: &[FeedEntry],
        discharge: Option<&DischargeSeries>,
        now: DateTime<Utc>,
    ) -> Vec<AlertItem> {
        let mut merged: Vec<AlertItem> = Vec::new();

        if let Some(series) = discharge {
            if let Some(item) = self.synthesize_discharge_alert(series, now) {
                merged.push(item);
            }
        }

        for entry in entries {
            if !matches_region(entry, &self.config.region_keywords) {
                continue;
            }
            merged.push(AlertItem {
                id: entry.guid.clone(),
                title: entry.title.clone(),
                description: entry.description.clone(),
                severity: classify_severity(&entry.title, &entry.description),
                source: AlertSource::Gdacs,
                timestamp: entry.published,
            });
        }

        merged.truncate(self.config.max_recent);

        if merged.is_empty() {
            merged.push(AlertItem {
                id: PLACEHOLDER_ID.to_string(),
                title: "No active alerts".to_string(),
                description: "No flood alerts are currently in effect for the monitored region."
                    .to_string(),
                severity: Severity::Low,
                source: AlertSource::System,
                timestamp: now,
            });
        }

        let new_items: Vec<AlertItem> = merged
            .iter()
            .filter(|item| item.source != AlertSource::System && !self.seen.contains(&item.id))
            .cloned()
            .collect();

        for item in &merged {
            self.seen.insert(item.id.clone());
        }
        self.recent = merged;

        if !new_items.is_empty() {
            tracing::info!(count = new_items.len(), "New alert items this cycle");
        }

        new_items
    }

    /// One high-severity entry describing the forecast peak, produced when
    /// the series maximum exceeds the threshold. Its identifier is derived
    /// from the forecast content so an unchanged forecast never re-fires.
    fn synthesize_discharge_alert(
        &self,
        series: &DischargeSeries,
        now: DateTime<Utc>,
    ) -> Option<AlertItem> {
        let peak = series.max_discharge()?;
        if peak <= self.config.discharge_threshold {
            return None;
        }
        let horizon = series.time.last().map(String::as_str).unwrap_or("unknown");
        Some(AlertItem {
            id: format!("river-discharge-{horizon}-{peak:.1}"),
            title: "High River Discharge Warning".to_string(),
            description: format!(
                "Cuvelai Basin forecast shows elevated discharge (peak {peak:.1} m³/s), flood risk increasing."
            ),
            severity: Severity::High,
            source: AlertSource::RiverForecast,
            timestamp: now,
        })
    }
}
