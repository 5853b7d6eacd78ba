//! Error types module
//!
//! All failures of the corpus client are unified under [`AppError`]. Each
//! variant knows the log level it should be reported at, so call sites can
//! convert an error into a display string and log it without matching on
//! every variant.

use std::fmt;
use std::io;

use crate::validation::ValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected requests and transport hiccups
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Non-2xx response from the corpus API.
///
/// The body is kept verbatim; [`ApiError::field`] pulls a message out of it
/// when the server answered with a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub body: String,
}

impl ApiError {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Top-level field of a JSON error body.
    ///
    /// Strings are returned as-is, other non-null values as their JSON text
    /// (FastAPI returns a list of objects under `detail` for 422s).
    pub fn field(&self, key: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        match value.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request failed with status code {}", self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Api(ApiError),

    #[error("Unauthorized: {0}")]
    Unauthorized(ApiError),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid or missing user ID.")]
    MissingUserId,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Session(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// The API response behind this error, if the server answered at all.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(err) | AppError::Unauthorized(err) => Some(err),
            _ => None,
        }
    }

    /// `key` from the response body, or the error's own text when the body
    /// has no such field or there was no response.
    pub fn response_message(&self, key: &str) -> String {
        self.api_error()
            .and_then(|err| err.field(key))
            .unwrap_or_else(|| self.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_) | AppError::NotAuthenticated)
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::Api(err) if err.status >= 500 => LogLevel::Error,
            AppError::Api(_)
            | AppError::Unauthorized(_)
            | AppError::Transport(_)
            | AppError::MissingUserId
            | AppError::NotAuthenticated => LogLevel::Warn,
            AppError::InvalidResponse(_) | AppError::Session(_) | AppError::Config(_) => {
                LogLevel::Error
            }
        }
    }

    /// Emit this error through `tracing` at its own level.
    pub fn log(&self, context: &str) {
        match self.log_level() {
            LogLevel::Debug => tracing::debug!(error = %self, "{}", context),
            LogLevel::Warn => tracing::warn!(error = %self, "{}", context),
            LogLevel::Error => tracing::error!(error = %self, "{}", context),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidResponse(format!("JSON parsing error: {}", err))
    }
}
