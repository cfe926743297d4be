//! Assessment pipeline
//!
//! Geocode, fetch forecast, pick the travel day and its surrounding trend,
//! ask the reasoning service, assemble the answer. Location and forecast
//! failures abort the request; reasoning failures only degrade the
//! recommendation text.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, instrument};

use super::{AssessmentResult, DateMatcher, ReasoningVariables, WindowExtractor};
use crate::AdvisorError;
use crate::location_resolver::LocationResolver;
use crate::models::HealthReport;
use crate::reasoning::ReasoningClient;
use crate::weather::{ForecastProvider, GeocodingProvider};

/// Pipeline states, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ResolvingLocation,
    FetchingForecast,
    MatchingDate,
    ExtractingWindow,
    BuildingPrompt,
    GeneratingAdvice,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::ResolvingLocation => "resolving location",
            PipelineStage::FetchingForecast => "fetching forecast",
            PipelineStage::MatchingDate => "matching date",
            PipelineStage::ExtractingWindow => "extracting window",
            PipelineStage::BuildingPrompt => "building prompt",
            PipelineStage::GeneratingAdvice => "generating advice",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Terminal failure of an assessment
#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("{0}")]
    InvalidRequest(AdvisorError),

    #[error("Could not geocode city: {0}")]
    Geocoding(AdvisorError),

    #[error("Weather fetch failed: {0}")]
    Forecast(AdvisorError),
}

impl AssessmentError {
    /// HTTP status equivalent
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            AssessmentError::InvalidRequest(_) | AssessmentError::Geocoding(_) => 400,
            AssessmentError::Forecast(_) => 500,
        }
    }
}

/// Sequences the collaborators for one request at a time; holds no
/// per-request state so a single instance serves concurrent requests.
#[derive(Clone)]
pub struct AssessmentOrchestrator {
    geocoder: Arc<dyn GeocodingProvider>,
    forecaster: Arc<dyn ForecastProvider>,
    reasoning: ReasoningClient,
    matcher: DateMatcher,
    window: WindowExtractor,
}

impl AssessmentOrchestrator {
    pub fn new(
        geocoder: Arc<dyn GeocodingProvider>,
        forecaster: Arc<dyn ForecastProvider>,
        reasoning: ReasoningClient,
    ) -> Self {
        Self {
            geocoder,
            forecaster,
            reasoning,
            matcher: DateMatcher::default(),
            window: WindowExtractor::default(),
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: WindowExtractor) -> Self {
        self.window = window;
        self
    }

    #[instrument(skip_all, fields(city = %report.destination_city, date = %report.travel_date))]
    pub async fn assess(&self, report: HealthReport) -> Result<AssessmentResult, AssessmentError> {
        let start_time = Instant::now();

        debug!("Stage: {}", PipelineStage::ResolvingLocation);
        let location = LocationResolver::resolve(self.geocoder.as_ref(), &report.destination_city)
            .await
            .map_err(|e| {
                error!("Geocoding failed: {}", e);
                AssessmentError::Geocoding(e)
            })?;

        debug!("Stage: {}", PipelineStage::FetchingForecast);
        let series = self
            .forecaster
            .daily_forecast(location.latitude, location.longitude)
            .await
            .map_err(|e| {
                error!("Forecast fetch failed: {}", e);
                AssessmentError::Forecast(e)
            })?;

        debug!("Stage: {}", PipelineStage::MatchingDate);
        let matched = self
            .matcher
            .find(&series, report.travel_date)
            .map_err(AssessmentError::Forecast)?;

        debug!("Stage: {}", PipelineStage::ExtractingWindow);
        let forecast_window = self.window.window(&series, report.travel_date);

        debug!("Stage: {}", PipelineStage::BuildingPrompt);
        let vars = ReasoningVariables::build(&report, &matched.day);

        debug!("Stage: {}", PipelineStage::GeneratingAdvice);
        let advice = self.reasoning.generate(&vars).await;
        let degraded = advice.is_degraded();

        let city = location
            .display_name()
            .unwrap_or_else(|| report.destination_city.clone());

        info!(
            exact_date = matched.is_exact(),
            window_points = forecast_window.len(),
            degraded,
            "Assessment for {} completed in {:.3}s",
            city,
            start_time.elapsed().as_secs_f64()
        );
        debug!("Stage: {}", PipelineStage::Done);

        Ok(AssessmentResult {
            recommendation: advice.into_text(),
            city,
            date: report.travel_date,
            forecast: matched.day,
            forecast_graph: forecast_window,
        })
    }
}
