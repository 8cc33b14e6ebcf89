//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connection refused, TLS).
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response. `message` is the server's `message` field when it sent one.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Text for the dismissible error banner on the screen that issued the call.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::HttpError { status, message } if !message.is_empty() && *status < 500 => message.clone(),
            FetchError::HttpError { status: 401, .. } => "Please sign in to continue".to_string(),
            FetchError::HttpError { status: 404, .. } => "Not found".to_string(),
            FetchError::HttpError { .. } => "Something went wrong on our side. Please try again.".to_string(),
            FetchError::Timeout => "The server took too long to respond. Please try again.".to_string(),
            FetchError::RequestError(_) | FetchError::InvalidUrl(_) => {
                "Unable to reach the store. Check your connection and try again.".to_string()
            }
            FetchError::ParseError(_) | FetchError::JsonError(_) => {
                "Received an unexpected response from the server".to_string()
            }
        }
    }

    /// HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
