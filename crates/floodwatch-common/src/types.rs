use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use floodwatch_common::types::Severity;
///
/// let sev: Severity = "medium".parse().unwrap();
/// assert_eq!(sev, Severity::Medium);
/// assert_eq!(sev.to_string(), "medium");
/// assert!(Severity::High > Severity::Low);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// Which upstream feed an alert item came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    /// GDACS disaster-event syndication feed.
    Gdacs,
    /// Open-Meteo river-discharge forecast.
    RiverForecast,
    /// Synthesized by the aggregator itself (e.g. the empty placeholder).
    System,
}

impl std::fmt::Display for AlertSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSource::Gdacs => write!(f, "gdacs"),
            AlertSource::RiverForecast => write!(f, "river_forecast"),
            AlertSource::System => write!(f, "system"),
        }
    }
}

/// One entry of the merged alert feed, held in memory only.
///
/// IDs are unique within the current recent-list; the aggregator uses them
/// to diff consecutive poll cycles.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AlertItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub source: AlertSource,
    pub timestamp: DateTime<Utc>,
}

/// A raw item parsed out of the disaster syndication feed, before any
/// region filtering or severity classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Feed-provided GUID; falls back to the link or title when absent.
    pub guid: String,
    pub title: String,
    pub description: String,
    pub published: DateTime<Utc>,
}

/// Daily river-discharge forecast series for one basin coordinate.
///
/// Providers omit values for days they cannot forecast, hence the `Option`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DischargeSeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub river_discharge: Vec<Option<f64>>,
}

impl DischargeSeries {
    /// Maximum non-null discharge value in the series, if any.
    pub fn max_discharge(&self) -> Option<f64> {
        self.river_discharge
            .iter()
            .flatten()
            .copied()
            .fold(None, |acc, v| match acc {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }
}

/// The weather snapshot served to clients, reshaped from the upstream
/// provider payload. Numeric fields default to 0 when the provider omits
/// them; `temperature` is rounded to one decimal place.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: String,
    pub temperature: f64,
    pub humidity: i64,
    pub condition: String,
    /// Rainfall in mm over the last hour.
    pub rainfall: f64,
    pub wind_speed: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn severity_round_trips_through_str() {
        for s in ["low", "medium", "high"] {
            let sev: Severity = s.parse().unwrap();
            assert_eq!(sev.to_string(), s);
        }
        assert!("red".parse::<Severity>().is_err());
    }

    #[test]
    fn max_discharge_skips_nulls() {
        let series = DischargeSeries {
            time: vec!["2026-03-01".into(), "2026-03-02".into(), "2026-03-03".into()],
            river_discharge: vec![Some(120.5), None, Some(433.0)],
        };
        assert_eq!(series.max_discharge(), Some(433.0));
    }

    #[test]
    fn max_discharge_of_empty_series_is_none() {
        assert_eq!(DischargeSeries::default().max_discharge(), None);
        let all_null = DischargeSeries {
            time: vec!["2026-03-01".into()],
            river_discharge: vec![None],
        };
        assert_eq!(all_null.max_discharge(), None);
    }
}
