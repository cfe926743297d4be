//! Travel health advisor
//!
//! Combines geocoding, a daily weather forecast and a generative-language
//! reasoning step into a single travel-advisability recommendation.

pub mod advisor;
pub mod api;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod reasoning;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisor::{AssessmentOrchestrator, AssessmentRequest, AssessmentResult};
pub use config::AdvisorConfig;
pub use error::AdvisorError;
pub use location_resolver::LocationResolver;
pub use models::{DailyForecastSeries, ForecastDay, ForecastWindowPoint, HealthReport, Location};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AdvisorError>;
