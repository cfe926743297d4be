//! Temperature trend around the travel date

use chrono::NaiveDate;

use crate::models::{DailyForecastSeries, ForecastWindowPoint};

pub const DEFAULT_RADIUS_DAYS: u32 = 3;

/// Derives the ±radius day slice of a forecast series
#[derive(Debug, Clone, Copy)]
pub struct WindowExtractor {
    radius_days: i64,
}

impl Default for WindowExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_DAYS)
    }
}

impl WindowExtractor {
    #[must_use]
    pub fn new(radius_days: u32) -> Self {
        Self {
            radius_days: i64::from(radius_days),
        }
    }

    /// Points whose date is within the radius of `target`, in series order.
    /// Empty when the target is far from every forecast day.
    #[must_use]
    pub fn window(
        &self,
        series: &DailyForecastSeries,
        target: NaiveDate,
    ) -> Vec<ForecastWindowPoint> {
        series
            .dates()
            .iter()
            .enumerate()
            .filter(|(_, date)| {
                let delta = (**date - target).num_days();
                (-self.radius_days..=self.radius_days).contains(&delta)
            })
            .filter_map(|(i, date)| {
                series.average_temp(i).map(|temp| ForecastWindowPoint { date: *date, temp })
            })
            .collect()
    }
}
