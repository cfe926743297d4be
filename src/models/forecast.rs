//! Daily forecast series and the values derived from it

use crate::AdvisorError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Multi-day daily forecast with aligned per-day sequences
///
/// Index `i` of every sequence describes `dates[i]`. Dates are calendar
/// dates in the location's own timezone and are kept in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastSeries {
    dates: Vec<NaiveDate>,
    min_temps: Vec<f64>,
    max_temps: Vec<f64>,
    weather_codes: Vec<i32>,
}

impl DailyForecastSeries {
    /// Build a series, rejecting sequences of different lengths
    pub fn new(
        dates: Vec<NaiveDate>,
        min_temps: Vec<f64>,
        max_temps: Vec<f64>,
        weather_codes: Vec<i32>,
    ) -> Result<Self, AdvisorError> {
        let len = dates.len();
        if min_temps.len() != len || max_temps.len() != len || weather_codes.len() != len {
            return Err(AdvisorError::upstream(format!(
                "Misaligned daily forecast: {} dates, {} min, {} max, {} weather codes",
                len,
                min_temps.len(),
                max_temps.len(),
                weather_codes.len()
            )));
        }

        Ok(Self {
            dates,
            min_temps,
            max_temps,
            weather_codes,
        })
    }

    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Forecast for the day at `index`, if the series is that long
    #[must_use]
    pub fn day_at(&self, index: usize) -> Option<ForecastDay> {
        Some(ForecastDay::from_code(
            *self.min_temps.get(index)?,
            *self.max_temps.get(index)?,
            *self.weather_codes.get(index)?,
        ))
    }

    /// Mean of min and max at `index`, rounded to one decimal
    #[must_use]
    pub fn average_temp(&self, index: usize) -> Option<f64> {
        let min = self.min_temps.get(index)?;
        let max = self.max_temps.get(index)?;
        Some(round_to_tenth((min + max) / 2.0))
    }
}

/// Forecast facts for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Minimum temperature in Celsius
    pub min: f64,
    /// Maximum temperature in Celsius
    pub max: f64,
    /// Textual tag of the WMO weather code, e.g. "Weather code: 3"
    pub description: String,
}

impl ForecastDay {
    /// The code is tagged, not decoded into weather terms
    #[must_use]
    pub fn from_code(min: f64, max: f64, weather_code: i32) -> Self {
        Self {
            min,
            max,
            description: format!("Weather code: {weather_code}"),
        }
    }
}

/// One point of the temperature trend around the travel date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastWindowPoint {
    pub date: NaiveDate,
    /// Average of min and max, one decimal
    pub temp: f64,
}

/// Round half away from zero to one decimal place
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
