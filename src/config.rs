//! Configuration management for the travel health advisor
//!
//! Handles loading configuration from an optional TOML file and
//! environment variables, and validates all settings.

use crate::AdvisorError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no reasoning key is configured
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Geocoding and forecast provider settings
    pub weather: WeatherConfig,
    /// Generative-language provider settings
    pub reasoning: ReasoningConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default pipeline settings
    pub defaults: DefaultsConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with a built frontend, served for unmatched paths
    pub static_dir: Option<String>,
}

/// Open-Meteo endpoints and request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL of the geocoding search endpoint
    pub geocoding_url: String,
    /// Base URL of the forecast endpoint
    pub forecast_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Gemini settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// API key; when absent the advisor answers with a placeholder
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Base URL of the generative-language API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or compact)
    pub format: String,
}

/// Default pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Half-width of the forecast window around the travel date, in days
    pub window_radius_days: u32,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_reasoning_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_reasoning_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: None,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_seconds: 10,
        }
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_reasoning_model(),
            base_url: default_reasoning_base_url(),
            timeout_seconds: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            window_radius_days: 3,
        }
    }
}

/// Export the `KEY=value` pairs of a dotenv file into the process
/// environment; variables already set are left untouched
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("Failed to read environment file {}", path.display()))
}

impl AdvisorConfig {
    /// Load configuration from `config_path`, or `config.toml` when not given,
    /// layered under `ADVISOR_` environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // ADVISOR_SERVER__PORT=9000 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("ADVISOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AdvisorConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.reasoning.api_key.is_none() {
            config.reasoning.api_key = std::env::var(GEMINI_KEY_ENV).ok();
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = WeatherConfig::default().timeout_seconds;
        }
        if self.reasoning.model.is_empty() {
            self.reasoning.model = default_reasoning_model();
        }
        if self.reasoning.base_url.is_empty() {
            self.reasoning.base_url = default_reasoning_base_url();
        }
        if self.reasoning.timeout_seconds == 0 {
            self.reasoning.timeout_seconds = ReasoningConfig::default().timeout_seconds;
        }
        // A blank key behaves like a missing one
        if self
            .reasoning
            .api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.reasoning.api_key = None;
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                AdvisorError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.reasoning.timeout_seconds > 600 {
            return Err(
                AdvisorError::config("Reasoning API timeout cannot exceed 600 seconds").into(),
            );
        }

        if self.defaults.window_radius_days > 16 {
            return Err(AdvisorError::config(
                "Forecast window radius cannot exceed 16 days",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AdvisorError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AdvisorError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.weather.geocoding_url),
            ("Forecast", &self.weather.forecast_url),
            ("Reasoning", &self.reasoning.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AdvisorError::config(format!(
                    "{name} API URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
