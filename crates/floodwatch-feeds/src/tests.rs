use chrono::Utc;

use crate::gdacs::GdacsClient;
use crate::open_meteo::FloodResponse;
use crate::weather::{reshape, CurrentConditions};

#[test]
fn reshape_rounds_temperature_and_defaults_optional_readings() {
    let payload: CurrentConditions = serde_json::from_str(
        r#"{"main":{"temp":24.36,"humidity":60},"weather":[{"description":"clear sky"}]}"#,
    )
    .unwrap();

    let report = reshape(&payload, Utc::now()).unwrap();
    assert_eq!(report.temperature, 24.4);
    assert_eq!(report.humidity, 60);
    assert_eq!(report.condition, "clear sky");
    assert_eq!(report.rainfall, 0.0);
    assert_eq!(report.wind_speed, 0.0);
    assert_eq!(report.location, "Unknown Location");
}

#[test]
fn reshape_keeps_provider_readings_when_present() {
    let payload: CurrentConditions = serde_json::from_str(
        r#"{
            "name": "Oshakati",
            "main": {"temp": 31.95, "humidity": 42},
            "weather": [{"description": "light rain"}],
            "rain": {"1h": 2.3},
            "wind": {"speed": 4.1}
        }"#,
    )
    .unwrap();

    let report = reshape(&payload, Utc::now()).unwrap();
    assert_eq!(report.location, "Oshakati");
    assert_eq!(report.temperature, 32.0);
    assert_eq!(report.rainfall, 2.3);
    assert_eq!(report.wind_speed, 4.1);
}

#[test]
fn reshape_rejects_payload_without_main_block() {
    let payload: CurrentConditions =
        serde_json::from_str(r#"{"weather":[{"description":"clear sky"}]}"#).unwrap();
    assert!(reshape(&payload, Utc::now()).is_err());
}

#[test]
fn reshape_rejects_payload_without_weather_descriptor() {
    let payload: CurrentConditions =
        serde_json::from_str(r#"{"main":{"temp":20.0,"humidity":50},"weather":[]}"#).unwrap();
    assert!(reshape(&payload, Utc::now()).is_err());
}

const GDACS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>GDACS</title>
    <link>https://gdacs.org</link>
    <description>Global Disaster Alert and Coordination System</description>
    <item>
      <title>Red alert Flood in Namibia</title>
      <description>Flooding reported in the Cuvelai basin.</description>
      <guid>FL-2026-000123</guid>
      <pubDate>Wed, 04 Mar 2026 06:15:00 GMT</pubDate>
    </item>
    <item>
      <title>Green earthquake alert in Chile</title>
      <description>Magnitude 5.1 offshore.</description>
      <link>https://gdacs.org/report?eventid=EQ-2026-000456</link>
      <pubDate>not a date</pubDate>
    </item>
  </channel>
</rss>"#;

#[test]
fn gdacs_parse_extracts_entries_with_stable_ids() {
    let now = Utc::now();
    let entries = GdacsClient::parse(GDACS_SAMPLE.as_bytes(), now).unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].guid, "FL-2026-000123");
    assert_eq!(entries[0].title, "Red alert Flood in Namibia");
    assert!(entries[0].description.contains("Cuvelai"));
    assert_ne!(entries[0].published, now);

    // No guid: falls back to the link; unparseable pubDate: falls back to now
    assert_eq!(
        entries[1].guid,
        "https://gdacs.org/report?eventid=EQ-2026-000456"
    );
    assert_eq!(entries[1].published, now);
}

#[test]
fn gdacs_parse_rejects_non_xml() {
    assert!(GdacsClient::parse(b"{\"not\": \"xml\"}", Utc::now()).is_err());
}

#[test]
fn flood_response_with_missing_daily_is_empty() {
    let resp: FloodResponse = serde_json::from_str(r#"{}"#).unwrap();
    let series = resp.series();
    assert!(series.river_discharge.is_empty());
    assert_eq!(series.max_discharge(), None);
}

#[test]
fn flood_response_parses_daily_series() {
    let resp: FloodResponse = serde_json::from_str(
        r#"{"daily":{"time":["2026-03-01","2026-03-02"],"river_discharge":[312.4,null]}}"#,
    )
    .unwrap();
    let series = resp.series();
    assert_eq!(series.time.len(), 2);
    assert_eq!(series.max_discharge(), Some(312.4));
}
