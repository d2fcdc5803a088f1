//! Result of one relay invocation.

use std::time::Duration;

use thiserror::Error;

use crate::gateway::{ProviderError, ProviderMessageId};

/// Why a relay invocation did not produce a sent message.
///
/// Every variant is terminal for the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// A required record field was absent or empty. The gateway was not called.
    #[error("missing required field")]
    MissingField {
        /// The first missing field (see [`field`](super::field)).
        field: &'static str,
    },

    /// The gateway rejected or failed to process the send.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// The gateway call did not complete within the configured timeout.
    #[error("Provider request timed out after {}s", .after.as_secs())]
    Timeout {
        /// The configured timeout.
        after: Duration,
    },
}

impl RelayError {
    /// Returns true for input errors detected before any provider call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    /// Returns the provider error, if the provider produced one.
    #[must_use]
    pub const fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(e) => Some(e),
            _ => None,
        }
    }
}

/// Ephemeral outcome of relaying one record. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The provider accepted the message for delivery.
    Sent {
        /// Identifier assigned by the provider.
        provider_message_id: ProviderMessageId,
    },
    /// The message was not accepted.
    Failed(RelayError),
}

impl SendOutcome {
    /// Returns true if the provider accepted the message.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    /// Returns the provider message id on success.
    #[must_use]
    pub const fn provider_message_id(&self) -> Option<&ProviderMessageId> {
        match self {
            Self::Sent {
                provider_message_id,
            } => Some(provider_message_id),
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure reason, or `None` on success.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Sent { .. } => None,
            Self::Failed(e) => Some(e.to_string()),
        }
    }

    /// Returns the provider error code, if the failure carried one.
    #[must_use]
    pub fn provider_error_code(&self) -> Option<&str> {
        match self {
            Self::Failed(RelayError::Provider(e)) => e.code.as_deref(),
            _ => None,
        }
    }
}

impl From<Result<ProviderMessageId, RelayError>> for SendOutcome {
    fn from(result: Result<ProviderMessageId, RelayError>) -> Self {
        match result {
            Ok(provider_message_id) => Self::Sent {
                provider_message_id,
            },
            Err(e) => Self::Failed(e),
        }
    }
}
