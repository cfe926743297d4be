//! Selection of the forecast day for the travel date

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{DailyForecastSeries, ForecastDay};
use crate::{AdvisorError, Result};

/// Policy applied when picking the forecast day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Exact calendar match, otherwise the first day of the series
    #[default]
    NearestAvailableOrFirst,
}

/// Day chosen for the travel date
#[derive(Debug, Clone, PartialEq)]
pub struct DateMatch {
    pub day: ForecastDay,
    pub index: usize,
    /// `false` when the travel date is outside the forecast horizon
    pub exact: bool,
}

impl DateMatch {
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.exact
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateMatcher {
    strategy: MatchStrategy,
}

impl DateMatcher {
    #[must_use]
    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    /// Fails only when the series has no days at all
    pub fn find(&self, series: &DailyForecastSeries, target: NaiveDate) -> Result<DateMatch> {
        match self.strategy {
            MatchStrategy::NearestAvailableOrFirst => {
                let exact_index = series.dates().iter().position(|d| *d == target);
                let index = exact_index.unwrap_or(0);

                let day = series.day_at(index).ok_or_else(|| {
                    AdvisorError::upstream("Forecast contains no days to match against")
                })?;

                match exact_index {
                    Some(_) => debug!("Forecast day {} matches {}", index, target),
                    None => warn!(
                        "Travel date {} outside forecast horizon, using first available day",
                        target
                    ),
                }

                Ok(DateMatch {
                    day,
                    index,
                    exact: exact_index.is_some(),
                })
            }
        }
    }
}
