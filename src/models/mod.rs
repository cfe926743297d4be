//! Data models for the travel health advisor
//!
//! This module contains the request-scoped domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Forecast: Daily forecast series and the values derived from it
//! - Health: The traveler's self-reported state

pub mod forecast;
pub mod health;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{DailyForecastSeries, ForecastDay, ForecastWindowPoint};
pub use health::HealthReport;
pub use location::Location;
