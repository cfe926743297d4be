use async_trait::async_trait;

use crate::Result;
use crate::models::{DailyForecastSeries, Location};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Free-text place name to candidate locations
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Candidates in provider ranking order; an empty list means "no match"
    async fn geocode(&self, name: &str) -> Result<Vec<Location>>;
}

/// Coordinates to a daily forecast
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<DailyForecastSeries>;
}
