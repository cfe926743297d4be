//! Error types and handling for the travel health advisor

use thiserror::Error;

/// Main error type for the advisor pipeline
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Geocoding returned no candidate for the requested place
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// Transport, HTTP or payload-shape failure from a weather provider
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AdvisorError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
