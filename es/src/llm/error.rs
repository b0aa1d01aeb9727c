//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to a generation provider
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Provider rate limited the request, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("Provider returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Could not reach provider: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unreadable provider response: {0}")]
    InvalidResponse(String),

    #[error("Provider did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Provider misconfigured: {0}")]
    Config(String),
}

impl LlmError {
    /// Classify a reqwest failure, separating timeouts from other network errors
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(timeout)
        } else {
            LlmError::Network(err)
        }
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    /// Check if a caller could reasonably try again
    ///
    /// Informational only: no request in this crate is retried automatically.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::ApiError { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::Timeout(_) => true,
            LlmError::InvalidResponse(_) => false,
            LlmError::Config(_) => false,
        }
    }

    /// Get the retry duration if this is a rate limit error
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}
