//! Error types for the SafeNet plugin.
//!
//! Each layer owns a narrow error enum ([`FetchError`] for HTTP exchanges,
//! [`ValidationError`] for the registration form) and [`SafeNetError`] folds
//! them together with I/O, theme and configuration failures. All errors are
//! implemented with `thiserror`.

use thiserror::Error;

pub use crate::domain::registration::ValidationError;

/// Failure of a single HTTP exchange with the relief backend.
///
/// A fetch or a submission ends in exactly one of these, or succeeds. None of
/// them is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (no connectivity, timeout,
    /// refused connection).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` carries the `error` field of the JSON body when present.
    #[error("HTTP {status}{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-provided error message, if the body had one.
        message: Option<String>,
    },

    /// The response body was not in the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns the HTTP status for [`FetchError::Http`], `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Returns the message the server attached to the failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// The main error type for SafeNet plugin operations.
///
/// # Examples
///
/// ```
/// use safenet::domain::{FetchError, SafeNetError};
///
/// let err: SafeNetError = FetchError::Network("connection refused".into()).into();
/// assert!(err.to_string().contains("connection refused"));
/// ```
#[derive(Debug, Error)]
pub enum SafeNetError {
    /// An HTTP exchange failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The registration form did not pass local validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A Zellij request context could not be decoded.
    #[error("Request context error: {0}")]
    Context(String),
}

/// A specialized `Result` type for SafeNet operations.
pub type Result<T> = std::result::Result<T, SafeNetError>;
