//! Travel advisability assessment
//!
//! Request/response contracts and the pipeline that connects them:
//! - `date_matcher`: forecast day for the travel date
//! - `window`: temperature trend around that date
//! - `prompt`: reasoning variables and the advice prompt
//! - `orchestrator`: the end-to-end sequence and its failure mapping

pub mod date_matcher;
pub mod orchestrator;
pub mod prompt;
pub mod window;

pub use date_matcher::{DateMatch, DateMatcher, MatchStrategy};
pub use orchestrator::{AssessmentError, AssessmentOrchestrator, PipelineStage};
pub use prompt::ReasoningVariables;
pub use window::WindowExtractor;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AdvisorError;
use crate::models::{ForecastDay, ForecastWindowPoint, HealthReport};

/// Body of an assessment request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssessmentRequest {
    /// Body temperature in Celsius
    pub temp: f64,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub other: Option<String>,
    pub city: String,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
}

impl AssessmentRequest {
    /// Validate and convert into a health report
    pub fn into_report(self) -> Result<HealthReport, AdvisorError> {
        let city = self.city.trim();
        if city.is_empty() {
            return Err(AdvisorError::validation("Destination city cannot be empty"));
        }

        let date = self.date.trim();
        if date.is_empty() {
            return Err(AdvisorError::validation("Travel date cannot be empty"));
        }
        let travel_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            AdvisorError::validation(format!(
                "Travel date '{date}' is not an ISO calendar date (YYYY-MM-DD): {e}"
            ))
        })?;

        Ok(HealthReport {
            temperature: self.temp,
            symptoms: self.symptoms,
            other_notes: self.other,
            destination_city: city.to_string(),
            travel_date,
        })
    }
}

/// Outcome of a successful assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub recommendation: String,
    /// "Name, Country" when geocoding supplied both, otherwise the input city
    pub city: String,
    pub date: NaiveDate,
    pub forecast: ForecastDay,
    #[serde(rename = "forecastGraph")]
    pub forecast_graph: Vec<ForecastWindowPoint>,
}
