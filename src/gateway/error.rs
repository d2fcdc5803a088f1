//! Error types for gateway operations.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong on the wire. The gateway folds these into a
/// [`ProviderError`] without a provider code.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A send request the provider rejected or could not process.
///
/// Carries the provider's own error code, message and documentation link
/// verbatim. Transport failures have no `code`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Provider error code (e.g. `"21211"`), if the provider supplied one.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Link to the provider's documentation for this error.
    pub more_info: Option<String>,
    /// HTTP status of the provider response, if one was received.
    pub status: Option<u16>,
}

impl ProviderError {
    /// Creates an error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            more_info: None,
            status: None,
        }
    }

    /// Sets the provider error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the documentation link.
    #[must_use]
    pub fn with_more_info(mut self, more_info: impl Into<String>) -> Self {
        self.more_info = Some(more_info.into());
        self
    }

    /// Sets the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl From<HttpError> for ProviderError {
    fn from(error: HttpError) -> Self {
        Self::new(error.to_string())
    }
}
