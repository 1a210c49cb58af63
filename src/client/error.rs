//! Client error types
//!
//! Errors are grouped into the categories callers actually branch on:
//! connection problems, authentication failures, server faults, and
//! everything else the request itself got wrong.

use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur when talking to the MuscleMetrics API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// Server could not be reached
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request could not be built or sent
    #[error("Request failed: {0}")]
    Request(String),

    /// 401 or 403
    #[error("Authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 5xx
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Input rejected before sending
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token store failure
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Coarse grouping used for notices and fallback decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connection,
    Auth,
    Server,
    Client,
}

impl ClientError {
    /// Build an error from a non-success HTTP status and the server's message
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized { status, message },
            404 => ClientError::NotFound(message),
            500..=599 => ClientError::Server { status, message },
            _ => ClientError::Api { status, message },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Timeout | ClientError::Connection(_) => ErrorCategory::Connection,
            ClientError::Unauthorized { .. } => ErrorCategory::Auth,
            ClientError::Server { .. } => ErrorCategory::Server,
            _ => ErrorCategory::Client,
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status, .. }
            | ClientError::Server { status, .. }
            | ClientError::Api { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Whether the stored token should be discarded: an auth failure whose
    /// message says the token is expired or invalid.
    pub fn invalidates_token(&self) -> bool {
        match self {
            ClientError::Unauthorized { message, .. } => {
                let message = message.to_lowercase();
                message.contains("expired") || message.contains("invalid")
            }
            _ => false,
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Timeout | ClientError::Connection(_) => {
                "Could not connect to the server. Please check your connection.".to_string()
            }
            ClientError::Unauthorized { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Unauthorized { .. } => {
                "Authentication required. Please log in again.".to_string()
            }
            ClientError::Server { .. } => {
                "Server error - the backend may be experiencing issues".to_string()
            }
            ClientError::NotFound(message) | ClientError::Api { message, .. }
                if !message.is_empty() =>
            {
                message.clone()
            }
            ClientError::NotFound(_) => "The requested item was not found".to_string(),
            ClientError::Api { status, .. } => format!("Request failed with status {}", status),
            ClientError::Validation(message) => message.clone(),
            ClientError::Decode(_) => "Unexpected response from the server".to_string(),
            ClientError::Request(message) => format!("Request failed: {}", message),
            ClientError::Session(_) => "Failed to access the saved session".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers with `{"message": ...}` or `{"error": ...}`; anything
/// else is passed through as trimmed text.
pub(crate) fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.trim().to_string()
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
