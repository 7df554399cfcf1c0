//! Error types for the Grafana API client.

use crate::http::{BoxError, HttpMethod};
use thiserror::Error;

/// Base error type for Grafana API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP exchange itself failed (DNS, connect, TLS, transport timeout).
    #[error("{method} {path}: transport error: {source}")]
    Transport {
        method: HttpMethod,
        path: String,
        #[source]
        source: BoxError,
    },

    /// The caller's context was cancelled before the exchange completed.
    #[error("{method} {path}: request cancelled")]
    Cancelled { method: HttpMethod, path: String },

    /// The caller's context deadline passed before the exchange completed.
    #[error("{method} {path}: context deadline exceeded")]
    DeadlineExceeded { method: HttpMethod, path: String },

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("{method} {path}: failed to decode response body: {source}")]
    Decode {
        method: HttpMethod,
        path: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized; nothing was sent.
    #[error("{path}: failed to encode request body: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request path {0:?}: expected a path relative to the base URL")]
    InvalidPath(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status code, when the server answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True for both explicit cancellation and deadline expiry.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Cancelled { .. } | Error::DeadlineExceeded { .. }
        )
    }
}

/// Raised when the API answers with a status outside 200..=299.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("status: {status}, {method} {path}, body: {body}")]
pub struct ApiError {
    pub status: u16,
    pub method: HttpMethod,
    pub path: String,
    /// Raw response body, decoded as UTF-8 (lossy) and trimmed.
    pub body: String,
}

impl ApiError {
    pub fn new(
        status: u16,
        method: HttpMethod,
        path: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            method,
            path: path.into(),
            body: body.into(),
        }
    }

    /// The body parsed as JSON, when it is JSON.
    pub fn response_data(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Grafana's `{"message": "..."}` error text, when present.
    pub fn message(&self) -> Option<String> {
        self.response_data()?
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
    }
}
