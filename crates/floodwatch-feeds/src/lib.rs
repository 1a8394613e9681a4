//! Clients for the external data providers the service fronts.
//!
//! One client per provider, each behind an async trait so route handlers
//! and the alert scheduler can be exercised against test doubles:
//! [`WeatherProvider`] (current conditions), [`DisasterFeed`] (disaster
//! syndication feed), [`FloodForecast`] (river-discharge forecast).

pub mod error;
pub mod gdacs;
pub mod open_meteo;
pub mod weather;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use floodwatch_common::types::{DischargeSeries, FeedEntry};

use crate::error::Result;
use crate::weather::CurrentConditions;

/// Source of current weather conditions for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the raw upstream conditions payload. Reshaping into the
    /// public contract happens at the API layer.
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentConditions>;
}

/// Source of disaster-event entries (syndication feed).
#[async_trait]
pub trait DisasterFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedEntry>>;
}

/// Source of the daily river-discharge forecast for a basin coordinate.
#[async_trait]
pub trait FloodForecast: Send + Sync {
    async fn daily_discharge(&self, lat: f64, lon: f64) -> Result<DischargeSeries>;
}

pub use gdacs::GdacsClient;
pub use open_meteo::OpenMeteoFloodClient;
pub use weather::OpenWeatherClient;
