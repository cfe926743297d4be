//! Open-Meteo geocoding and forecast client
//!
//! Neither endpoint needs an API key. Requests are made once; any transport,
//! status or payload problem surfaces as an upstream error.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::{ForecastProvider, GeocodingProvider};
use crate::config::WeatherConfig;
use crate::models::{DailyForecastSeries, Location};
use crate::{AdvisorError, Result};

const DAILY_FIELDS: &str = "temperature_2m_min,temperature_2m_max,weathercode";

pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("travel-health-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdvisorError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    fn geocoding_request_url(&self, name: &str) -> String {
        format!(
            "{}?name={}&count=1&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(name)
        )
    }

    fn forecast_request_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}?latitude={}&longitude={}&daily={}&timezone=auto",
            self.forecast_url, latitude, longitude, DAILY_FIELDS
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();
        debug!("Open-Meteo request URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Network error calling Open-Meteo: {}", e);
            AdvisorError::upstream(format!("Network error: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Open-Meteo responded with HTTP {}", status);
            return Err(AdvisorError::upstream(format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response.json::<T>().await.map_err(|e| {
            error!("Failed to parse Open-Meteo response: {}", e);
            AdvisorError::upstream(format!("Invalid data received from Open-Meteo: {e}"))
        })?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow Open-Meteo response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}

#[async_trait]
impl GeocodingProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, name: &str) -> Result<Vec<Location>> {
        info!("Geocoding location: '{}'", name);

        let response: GeocodingResponse = self.get_json(&self.geocoding_request_url(name)).await?;
        let locations: Vec<Location> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect();

        if locations.is_empty() {
            warn!("No results found for location '{}'", name);
        } else {
            debug!(
                "Geocoding results: {:?}",
                locations
                    .iter()
                    .map(|l| format!("{} ({})", l.name, l.format_coordinates()))
                    .collect::<Vec<_>>()
            );
        }

        Ok(locations)
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<DailyForecastSeries> {
        let start_time = Instant::now();

        let response: ForecastResponse = self
            .get_json(&self.forecast_request_url(latitude, longitude))
            .await?;
        let series = response.into_series()?;

        info!(
            "Retrieved daily forecast with {} days in {:.3}s",
            series.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        match result.country {
            Some(country) => {
                Location::with_country(result.latitude, result.longitude, result.name, country)
            }
            None => Location::new(result.latitude, result.longitude, result.name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Vec<Option<f64>>,
    #[serde(rename = "weathercode")]
    weather_code: Vec<Option<i32>>,
}

impl ForecastResponse {
    fn into_series(self) -> Result<DailyForecastSeries> {
        let daily = self
            .daily
            .ok_or_else(|| AdvisorError::upstream("Forecast response has no daily data"))?;

        let dates = daily
            .time
            .iter()
            .map(|t| {
                NaiveDate::parse_from_str(t, "%Y-%m-%d")
                    .map_err(|e| AdvisorError::upstream(format!("Invalid forecast date '{t}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        DailyForecastSeries::new(
            dates,
            required_values(daily.temperature_min, "temperature_2m_min")?,
            required_values(daily.temperature_max, "temperature_2m_max")?,
            required_values(daily.weather_code, "weathercode")?,
        )
    }
}

/// Open-Meteo reports unavailable values as `null`
fn required_values<T>(values: Vec<Option<T>>, field: &str) -> Result<Vec<T>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.ok_or_else(|| AdvisorError::upstream(format!("Missing {field} value at day {i}")))
        })
        .collect()
}
