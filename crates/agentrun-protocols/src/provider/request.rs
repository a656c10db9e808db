//! Generation request types.

use serde::{Deserialize, Serialize};

/// Request for a streamed text generation.
///
/// The prompt is final: any memory-derived context has already been folded in
/// by the orchestrator before the request reaches an adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier.
    pub model: String,

    /// Full prompt text.
    pub prompt: String,

    /// Sampling temperature (>= 0).
    pub temperature: f32,

    /// Base endpoint override; adapters fall back to their default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl GenerationRequest {
    /// Create a new request with temperature 0.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: 0.0,
            base_url: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the base endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
