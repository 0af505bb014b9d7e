//! Error types for the TFE client.
//!
//! Every failure is returned to the caller as a [`TfeError`]. The variants keep
//! four situations apart: input rejected locally before any request was built,
//! the transport failing, the server answering with an error status, and the
//! client being unable to read a successful answer.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the TFE client.
#[derive(Debug, Error)]
pub enum TfeError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input rejected before any request was built.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Network-level failure (connection refused, timeout, TLS).
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The call was aborted through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The request payload could not be serialized.
    #[error("Failed to encode request: {message}")]
    Encode {
        /// Description of the encoding failure.
        message: String,
    },
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// The API address is not a usable base URL.
    #[error("Invalid API address '{address}': {reason}")]
    InvalidAddress {
        /// The rejected address.
        address: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("Failed to create HTTP client: {message}")]
    HttpClient {
        /// Description of the builder failure.
        message: String,
    },
}

/// Input rejected locally, before any request is sent.
///
/// The rendered messages are part of the public contract: callers match on
/// `"Name is required"` or `"Invalid value for run ID"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required option was absent or empty.
    #[error("{field} is required")]
    Required {
        /// Display name of the missing field.
        field: &'static str,
    },

    /// An identifier was empty or blank.
    #[error("Invalid value for {field}")]
    InvalidValue {
        /// Display name of the identifier.
        field: &'static str,
    },
}

/// Error answers from the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the credentials (401).
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("API request failed: {status} - {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Error detail from the server, or the canonical reason.
        message: String,
    },
}

/// Result type alias for TFE client operations.
pub type Result<T> = std::result::Result<T, TfeError>;

impl TfeError {
    /// Creates a transport error with the given message.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a decoding error with the given message.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an encoding error with the given message.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Returns true if the server reported the resource as absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError::NotFound))
    }

    /// Returns true if the error was detected locally, before any request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the HTTP status carried by an API error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(ApiError::NotFound) => Some(404),
            Self::Api(ApiError::Unauthorized) => Some(401),
            Self::Api(ApiError::RequestFailed { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl ApiError {
    /// Maps a non-success status and server message onto an error kind.
    #[must_use]
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            _ => Self::RequestFailed {
                status: status.as_u16(),
                message: message.into(),
            },
        }
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
