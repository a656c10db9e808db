//! LLM provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// No adapter is registered for the agent's provider tag. Raised before
    /// any network call is attempted.
    #[error("Unsupported provider: {0}")]
    Unsupported(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Stream error: {0}")]
    StreamError(String),
}

impl ProviderError {
    /// Map a non-success HTTP response to the matching error kind.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            429 => Self::RateLimited(message),
            _ => Self::ApiError { status, message },
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
