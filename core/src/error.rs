//! Error types for the house API client.
//!
//! # Design
//! Resource clients never produce errors of their own: everything here is
//! raised by a transport (network, HTTP status, response envelope) or by the
//! DTO and config helpers. `NotFound` and `Unauthorized` get dedicated
//! variants because callers routinely branch on them. The backend answers
//! business failures with HTTP 200 and a non-200 envelope `code`; those land in
//! `Backend` with the server's message.

use thiserror::Error;

/// Errors returned by transports and the client helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned HTTP 404.
    #[error("resource not found")]
    NotFound,

    /// HTTP 401, or an envelope with code 401.
    #[error("unauthorized: missing or invalid credentials")]
    Unauthorized,

    /// A non-2xx status other than 401 and 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response envelope reported a failure code.
    #[error("backend error {code}: {msg}")]
    Backend { code: i64, msg: String },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A typed value could not be turned into a query or payload object.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}
