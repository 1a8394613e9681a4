use async_trait::async_trait;
use floodwatch_common::types::DischargeSeries;
use serde::Deserialize;

use crate::error::{FeedError, Result};
use crate::FloodForecast;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FloodResponse {
    #[serde(default)]
    pub daily: Option<DischargeSeries>,
}

impl FloodResponse {
    /// The daily series, empty when the provider sent none.
    pub fn series(self) -> DischargeSeries {
        self.daily.unwrap_or_default()
    }
}

/// Open-Meteo flood-forecast client (daily river discharge).
pub struct OpenMeteoFloodClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoFloodClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| "https://flood-api.open-meteo.com".to_string()),
        }
    }
}

#[async_trait]
impl FloodForecast for OpenMeteoFloodClient {
    async fn daily_discharge(&self, lat: f64, lon: f64) -> Result<DischargeSeries> {
        let url = format!(
            "{}/v1/flood?latitude={}&longitude={}&daily=river_discharge",
            self.base_url, lat, lon
        );
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::HttpError {
                provider: "open-meteo",
                status: status.as_u16(),
            });
        }
        Ok(resp.json::<FloodResponse>().await?.series())
    }
}
