//! Port for the external random-identity generator.

use async_trait::async_trait;

use crate::domain::UserDraft;

/// Failures of the external generator call. All variants are terminal
/// for the request; the create handler folds them into a 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RandomUserSourceError {
    /// Network transport failed before a response arrived.
    #[error("random user transport failed: {message}")]
    Transport { message: String },

    /// The call exceeded the configured timeout.
    #[error("random user request timed out: {message}")]
    Timeout { message: String },

    /// The endpoint answered with a non-success status.
    #[error("random user endpoint returned an error: {message}")]
    Status { message: String },

    /// The response body could not be decoded.
    #[error("random user response decode failed: {message}")]
    Decode { message: String },
}

impl RandomUserSourceError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a status error with the given message.
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port producing a synthetic user draft from a third-party service.
#[async_trait]
pub trait RandomUserSource: Send + Sync {
    /// Fetch one randomly generated identity, mapped into a [`UserDraft`]
    /// with no assigned identifier. Never retries.
    async fn fetch_random_user(&self) -> Result<UserDraft, RandomUserSourceError>;
}
