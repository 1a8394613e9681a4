use async_trait::async_trait;
use chrono::{DateTime, Utc};
use floodwatch_common::types::WeatherReport;
use serde::Deserialize;

use crate::error::{FeedError, Result};
use crate::WeatherProvider;

/// Raw current-conditions payload from the OpenWeather API, limited to the
/// fields the service consumes. `main` and `weather` are required by the
/// contract; everything else defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<ConditionCode>,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub wind: Option<Wind>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionCode {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Precipitation {
    /// Rainfall over the last hour, mm.
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Reshape the raw provider payload into the public weather contract.
///
/// Fails when the payload is missing the `main` block or the first
/// `weather` element; all optional readings default to 0.
pub fn reshape(payload: &CurrentConditions, now: DateTime<Utc>) -> Result<WeatherReport> {
    let main = payload.main.as_ref().ok_or(FeedError::MalformedPayload {
        provider: "openweather",
        detail: "missing main block".to_string(),
    })?;
    let condition = payload
        .weather
        .first()
        .ok_or(FeedError::MalformedPayload {
            provider: "openweather",
            detail: "missing weather descriptor".to_string(),
        })?;

    Ok(WeatherReport {
        location: payload
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown Location".to_string()),
        temperature: (main.temp * 10.0).round() / 10.0,
        humidity: main.humidity,
        condition: condition.description.clone(),
        rainfall: payload.rain.as_ref().and_then(|r| r.one_hour).unwrap_or(0.0),
        wind_speed: payload.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0),
        timestamp: now,
    })
}

/// OpenWeather current-conditions client.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| "https://api.openweathermap.org".to_string()),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentConditions> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&units=metric&appid={}",
            self.base_url, lat, lon, self.api_key
        );
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::HttpError {
                provider: "openweather",
                status: status.as_u16(),
            });
        }
        Ok(resp.json::<CurrentConditions>().await?)
    }
}
