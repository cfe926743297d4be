//! Generative-language reasoning
//!
//! The reasoning step never fails a request. Whatever the provider does is
//! captured as an [`AdviceOutcome`] and only turned into text when the
//! response is assembled.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::advisor::ReasoningVariables;

pub mod gemini;

pub use gemini::GeminiClient;

/// Placeholder returned when no API key is configured
pub const UNCONFIGURED_MESSAGE: &str = "Gemini API key not configured.";

/// Returned when the model answers with no text
pub const EMPTY_RESPONSE_MESSAGE: &str = "No response generated from AI.";

#[derive(Error, Debug)]
pub enum ReasoningError {
    #[error("reasoning service credential is not configured")]
    NotConfigured,

    #[error("{0}")]
    Request(String),

    #[error("{0}")]
    InvalidResponse(String),
}

/// Single free-text prompt to free-text completion
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ReasoningError>;
}

/// What the reasoning step produced
#[derive(Debug, Clone, PartialEq)]
pub enum AdviceOutcome {
    Generated(String),
    Empty,
    Unconfigured,
    Failed(String),
}

impl AdviceOutcome {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !matches!(self, AdviceOutcome::Generated(_))
    }

    /// Recommendation text shown to the traveler
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            AdviceOutcome::Generated(text) => text,
            AdviceOutcome::Empty => EMPTY_RESPONSE_MESSAGE.to_string(),
            AdviceOutcome::Unconfigured => UNCONFIGURED_MESSAGE.to_string(),
            AdviceOutcome::Failed(error) => format!("AI error: {error}"),
        }
    }
}

/// Renders the advice prompt and classifies the provider's answer
#[derive(Clone)]
pub struct ReasoningClient {
    provider: Arc<dyn ReasoningProvider>,
}

impl ReasoningClient {
    pub fn new(provider: Arc<dyn ReasoningProvider>) -> Self {
        Self { provider }
    }

    #[instrument(skip_all, fields(city = %vars.city))]
    pub async fn generate(&self, vars: &ReasoningVariables) -> AdviceOutcome {
        let prompt = vars.render_prompt();

        match self.provider.complete(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("Reasoning service returned an empty answer");
                AdviceOutcome::Empty
            }
            Ok(text) => {
                info!("Generated advice ({} chars)", text.len());
                AdviceOutcome::Generated(text)
            }
            Err(ReasoningError::NotConfigured) => {
                warn!("Reasoning service not configured, returning placeholder");
                AdviceOutcome::Unconfigured
            }
            Err(e) => {
                warn!("Reasoning service failed: {}", e);
                AdviceOutcome::Failed(e.to_string())
            }
        }
    }
}
