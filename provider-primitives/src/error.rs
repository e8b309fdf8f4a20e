//! Shared error definitions for provider descriptors.

use thiserror::Error;

/// Result alias used by descriptor constructors.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building provider descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The provider identifier failed validation.
    #[error("invalid provider id `{id}`: {reason}")]
    InvalidProviderId {
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A provider descriptor failed validation.
    #[error("invalid provider spec: {reason}")]
    InvalidSpec {
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }
}
