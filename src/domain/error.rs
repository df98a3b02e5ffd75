//! Error types shared by every layer of the client.

use thiserror::Error;

/// Top-level error returned by every public client operation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input rejected before any network I/O
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("External service error: {0}")]
    ExternalService(#[from] ExternalServiceError),

    /// The auth handshake failed or returned no token
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl AppError {
    /// Returns the validation error if this failure happened before any I/O.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of a remote failure, if the service answered at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ExternalService(ExternalServiceError::ApiError { status_code, .. }) => {
                Some(*status_code)
            }
            _ => None,
        }
    }
}

/// Field-addressed validation failures.
///
/// The `Display` output is the exact message surfaced to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{resource} \"uid\" is required.")]
    MissingUid { resource: &'static str },

    #[error("\"{0}\" is required.")]
    MissingField(String),

    #[error("\"{0}\" is invalid.")]
    InvalidField(String),

    #[error("\"{field}\" should be {expected}.")]
    InvalidShape { field: String, expected: String },

    #[error("\"{field}\" should be formatted as {pattern}")]
    InvalidFormat {
        field: String,
        pattern: &'static str,
    },

    #[error("\"{field}\" must be {expected}.")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("\"query\" must be a {0} object.")]
    InvalidQuery(&'static str),

    #[error("\"{field}\" query must be {expected}.")]
    InvalidQueryField {
        field: &'static str,
        expected: &'static str,
    },

    #[error(
        "\"{field}\" query must be {expected}. Accepted values are: {}",
        allowed.join(" | ")
    )]
    InvalidQueryEnum {
        field: &'static str,
        expected: &'static str,
        allowed: &'static [&'static str],
    },
}

/// Failures talking to the remote API.
#[derive(Debug, Error)]
pub enum ExternalServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API returned {status_code}: {message}")]
    ApiError { status_code: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Client misconfigured: {0}")]
    Configuration(String),
}

/// Invalid client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVariable(&'static str),

    #[error("\"{0}\" is not a Rize environment. Accepted values are: sandbox | integration | production")]
    InvalidEnvironment(String),

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}
