//! Provider client error types.

use std::time::Duration;

/// Errors that can occur when fetching stations from the remote provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (connection, TLS, body read, client timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not finish within the allotted time
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Authentication failed
    #[error("unauthorized: check OCM_API_KEY")]
    Unauthorized,

    /// Rate limited by the provider
    #[error("rate limited by provider")]
    RateLimited,

    /// Provider returned an error status or an error envelope
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock data file could not be read
    #[error("mock data error: {message}")]
    Mock { message: String },
}

impl ProviderError {
    /// Whether the provider answered but the answer could not be understood.
    ///
    /// Everything else is a transport-level failure.
    pub fn is_malformed(&self) -> bool {
        match self {
            ProviderError::Json { .. } => true,
            ProviderError::Http(e) => e.is_decode(),
            _ => false,
        }
    }

    /// Whether the failure was a timeout, either ours or the HTTP client's.
    pub fn is_timeout(&self) -> bool {
        match self {
            ProviderError::Timeout(_) => true,
            ProviderError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
