//! Error types for the todo API server.
//!
//! # Design
//! Every rejection the API can produce is an `ApiError` variant whose
//! `Display` text is the exact plain-text body sent on the wire. Clients
//! forward 4xx bodies to users verbatim, so these strings are part of the
//! HTTP contract and must not be reworded.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors surfaced by the item store, independent of HTTP.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another item already carries this exact description.
    #[error("Description already exists")]
    DuplicateDescription,

    /// The storage backend failed; the message is passed through to the caller.
    #[error("{0}")]
    Backend(String),
}

/// Errors returned by route handlers, rendered as `(status, text/plain)`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The id parameter in the request body is invalid when creating an item")]
    IdOnCreate,

    #[error("The id parameter in the request body is invalid when updating an item")]
    IdOnUpdate,

    #[error("Description is required")]
    DescriptionRequired,

    #[error("Description already exists")]
    DescriptionExists,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("TodoItem not found")]
    NotFound,

    /// Any unexpected failure. The raw message becomes the 500 body.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::IdOnCreate
            | ApiError::IdOnUpdate
            | ApiError::DescriptionRequired
            | ApiError::DescriptionExists
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateDescription => ApiError::DescriptionExists,
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Errors raised while reading server configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
