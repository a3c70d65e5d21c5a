//! Error types for the backend API client.

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Retry policy class for API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    Retryable,
    Permanent,
}

/// Classified failures produced by the transport layer.
///
/// Every failure is normalized here before it reaches resource clients or
/// the cache layer; raw `reqwest` errors never cross that boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server (refused/DNS/offline).
    #[error("server unreachable: {0}")]
    NetworkUnavailable(String),

    /// The operation exceeded its timeout tier and was aborted.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// HTTP 4xx other than 409: malformed input, wrong file, not found.
    #[error("request rejected ({status}): {message}")]
    Client { status: u16, message: String },

    /// HTTP 409. The server message is actionable (e.g. duplicate upload)
    /// and is passed through verbatim.
    #[error("conflict: {0}")]
    Conflict(String),

    /// HTTP 5xx: backend fault or maintenance.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body was not valid JSON where JSON was expected.
    #[error("invalid response payload: {0}")]
    Parse(String),

    /// Request could not be constructed (bad header value, oversize body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Anything not classified above.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Build a `Client`/`Conflict`/`Server` error from an HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            409 => Self::Conflict(message),
            400..=499 => Self::Client { status, message },
            500..=599 => Self::Server { status, message },
            _ => Self::Unknown(format!("HTTP {}: {}", status, message)),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// HTTP status if this failure carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Conflict(_) => Some(409),
            _ => None,
        }
    }

    /// Classify for retry policy. Client-class failures will not succeed
    /// on retry; network, timeout and 5xx failures plausibly will.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::NetworkUnavailable(_) | Self::Timeout(_) | Self::Server { .. } => {
                RetryClass::Retryable
            }
            Self::Client { status, .. } if matches!(status, 408 | 429) => RetryClass::Retryable,
            Self::Client { .. }
            | Self::Conflict(_)
            | Self::Parse(_)
            | Self::InvalidRequest(_)
            | Self::Unknown(_) => RetryClass::Permanent,
        }
    }

    /// Actionable message for the UI. Never leaks status text or raw
    /// protocol detail; server-supplied messages are kept where they are
    /// the actionable part.
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkUnavailable(_) => {
                "Server unreachable — check your connection and that the backend is running."
                    .to_string()
            }
            Self::Timeout(_) => "The request timed out. Please try again.".to_string(),
            Self::Client { message, .. } => message.clone(),
            Self::Conflict(message) => message.clone(),
            Self::Server { .. } => {
                "The server hit an internal error. Please try again later.".to_string()
            }
            Self::Parse(_) => "The server returned an unexpected response.".to_string(),
            Self::InvalidRequest(message) => message.clone(),
            Self::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(std::time::Duration::ZERO);
        }
        if err.is_connect() {
            return Self::NetworkUnavailable(err.to_string());
        }
        if err.is_decode() {
            return Self::Parse(err.to_string());
        }
        if err.is_request() || err.is_body() {
            return Self::NetworkUnavailable(err.to_string());
        }
        Self::Unknown(err.to_string())
    }
}
