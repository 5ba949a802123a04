//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the item does not exist" from any other rejection. All other non-2xx
//! responses land in `HttpError` with the raw status and body. Failures that
//! never produced a usable HTTP exchange report status 0, which is how the
//! user-facing classification tells them apart.

use thiserror::Error;

/// Shown for any 5xx response.
pub const SERVER_FAULT_MESSAGE: &str = "The server has a temporary fault.";

/// Shown when no usable HTTP exchange happened.
pub const AWRY_MESSAGE: &str = "Something is awry";

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested item does not exist.
    #[error("resource not found: {body}")]
    NotFound { body: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never completed (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status behind this error, or 0 when there was none.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::NotFound { .. } => 404,
            ApiError::HttpError { status, .. } => *status,
            ApiError::Transport(_)
            | ApiError::DeserializationError(_)
            | ApiError::SerializationError(_) => 0,
        }
    }

    /// The message to show a user, or `None` to leave the current one alone.
    ///
    /// 5xx maps to a fixed fault message, 4xx forwards the server's text
    /// verbatim, and anything below 100 maps to a fixed "awry" message.
    pub fn user_message(&self) -> Option<String> {
        match self.status() {
            500.. => Some(SERVER_FAULT_MESSAGE.to_string()),
            400..=499 => Some(self.body().to_string()),
            0..=99 => Some(AWRY_MESSAGE.to_string()),
            _ => None,
        }
    }

    fn body(&self) -> &str {
        match self {
            ApiError::NotFound { body } | ApiError::HttpError { body, .. } => body,
            _ => "",
        }
    }
}
