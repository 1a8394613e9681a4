use chrono::{Duration, Utc};
use floodwatch_common::types::{AlertSource, DischargeSeries, FeedEntry, Severity};

use crate::aggregator::{AggregatorConfig, AlertAggregator};
use crate::severity::{classify_severity, matches_region};

fn entry(guid: &str, title: &str, description: &str) -> FeedEntry {
    FeedEntry {
        guid: guid.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        published: Utc::now() - Duration::minutes(30),
    }
}

fn discharge(values: &[Option<f64>]) -> DischargeSeries {
    DischargeSeries {
        time: (0..values.len()).map(|i| format!("2026-03-0{}", i + 1)).collect(),
        river_discharge: values.to_vec(),
    }
}

#[test]
fn severity_precedence_red_over_orange() {
    assert_eq!(
        classify_severity("Red alert Flood in Namibia", ""),
        Severity::High
    );
    assert_eq!(
        classify_severity("Orange alert Flood in Namibia", ""),
        Severity::Medium
    );
    assert_eq!(
        classify_severity("Green alert Flood in Namibia", ""),
        Severity::Low
    );
    // Red anywhere wins even when Orange also appears
    assert_eq!(
        classify_severity("Orange alert", "upgraded to Red overnight"),
        Severity::High
    );
}

#[test]
fn region_filter_matches_keyword_or_flood_case_insensitively() {
    let keywords = vec!["namibia".to_string()];
    assert!(matches_region(
        &entry("1", "Red alert Flood in Mozambique", ""),
        &keywords
    ));
    assert!(matches_region(
        &entry("2", "Drought conditions in NAMIBIA", ""),
        &keywords
    ));
    assert!(matches_region(
        &entry("3", "Cyclone watch", "heavy rain and flooding expected"),
        &keywords
    ));
    assert!(!matches_region(
        &entry("4", "Earthquake in Chile", "magnitude 5.1 offshore"),
        &keywords
    ));
}

#[test]
fn ingest_is_idempotent_for_unchanged_feed_content() {
    let mut agg = AlertAggregator::new(AggregatorConfig::default());
    let entries = vec![
        entry("FL-1", "Red alert Flood in Namibia", "Cuvelai basin"),
        entry("FL-2", "Orange alert Flood in Namibia", "Zambezi region"),
    ];
    let series = discharge(&[Some(450.0)]);

    let first = agg.ingest(&entries, Some(&series), Utc::now());
    assert_eq!(first.len(), 3);

    let second = agg.ingest(&entries, Some(&series), Utc::now());
    assert!(second.is_empty(), "identical content must not re-notify");
    assert_eq!(agg.snapshot().len(), 3);
}

#[test]
fn synthesized_discharge_alert_is_first_in_the_merged_list() {
    let mut agg = AlertAggregator::new(AggregatorConfig::default());
    let entries = vec![entry("FL-1", "Orange alert Flood in Namibia", "")];
    let series = discharge(&[Some(120.0), Some(433.0), None]);

    agg.ingest(&entries, Some(&series), Utc::now());
    let snapshot = agg.snapshot();
    assert_eq!(snapshot[0].source, AlertSource::RiverForecast);
    assert_eq!(snapshot[0].severity, Severity::High);
    assert_eq!(snapshot[0].title, "High River Discharge Warning");
}

#[test]
fn discharge_at_or_below_threshold_synthesizes_nothing() {
    let mut agg = AlertAggregator::new(AggregatorConfig::default());
    let series = discharge(&[Some(400.0)]);
    let new_items = agg.ingest(&[], Some(&series), Utc::now());
    assert!(new_items.is_empty());
}

#[test]
fn empty_merge_yields_single_placeholder_that_never_notifies() {
    let mut agg = AlertAggregator::new(AggregatorConfig::default());

    let new_items = agg.ingest(&[], None, Utc::now());
    assert!(new_items.is_empty());

    let snapshot = agg.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].source, AlertSource::System);
    assert_eq!(snapshot[0].title, "No active alerts");

    // A second quiet tick keeps exactly one placeholder
    let new_items = agg.ingest(&[], None, Utc::now());
    assert!(new_items.is_empty());
    assert_eq!(agg.snapshot().len(), 1);
}

#[test]
fn recent_list_is_capped() {
    let mut agg = AlertAggregator::new(AggregatorConfig {
        max_recent: 3,
        ..AggregatorConfig::default()
    });
    let entries: Vec<FeedEntry> = (0..10)
        .map(|i| entry(&format!("FL-{i}"), "Red alert Flood in Namibia", ""))
        .collect();

    let new_items = agg.ingest(&entries, None, Utc::now());
    assert_eq!(new_items.len(), 3);
    assert_eq!(agg.snapshot().len(), 3);
}

#[test]
fn partial_result_still_merges_the_surviving_feed() {
    let mut agg = AlertAggregator::new(AggregatorConfig::default());

    // Disaster feed unreachable: discharge alone still produces the warning
    let series = discharge(&[Some(500.0)]);
    let new_items = agg.ingest(&[], Some(&series), Utc::now());
    assert_eq!(new_items.len(), 1);
    assert_eq!(new_items[0].source, AlertSource::RiverForecast);

    // Forecast unreachable next tick: feed entries alone still arrive
    let entries = vec![entry("FL-9", "Orange alert Flood in Namibia", "")];
    let new_items = agg.ingest(&entries, None, Utc::now());
    assert_eq!(new_items.len(), 1);
    assert_eq!(new_items[0].id, "FL-9");
}

#[test]
fn changed_forecast_peak_renotifies_but_same_peak_does_not() {
    let mut agg = AlertAggregator::new(AggregatorConfig::default());

    let series = discharge(&[Some(450.0)]);
    assert_eq!(agg.ingest(&[], Some(&series), Utc::now()).len(), 1);
    assert!(agg.ingest(&[], Some(&series), Utc::now()).is_empty());

    let worse = discharge(&[Some(620.0)]);
    assert_eq!(agg.ingest(&[], Some(&worse), Utc::now()).len(), 1);
}
