//! Error types for the tracker backend
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the cache layer itself.
///
/// Loader errors are never wrapped in this type; `fetch_or_compute` returns
/// them unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A scoped invalidation pattern could not be built from its inputs
    #[error("Invalid invalidation pattern: {0}")]
    InvalidPattern(String),

    /// The sweeper was given a zero wake period
    #[error("Eviction interval must be positive")]
    ZeroInterval,
}

// == Archive Error Enum ==
/// Errors raised by the Internet Archive client.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The request could not be sent or its body could not be decoded
    #[error("Internet Archive request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Internet Archive returned status {0}")]
    Status(u16),
}

// == Config Error Enum ==
/// Errors raised while loading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("Missing required configuration variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    /// A duration variable parsed to zero
    #[error("{0} must be a positive duration")]
    NonPositive(&'static str),
}

// == Api Error Enum ==
/// Unified error type for HTTP handlers and the services behind them.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache layer failure
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Third-party API failure
    #[error(transparent)]
    Upstream(#[from] ArchiveError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Cache(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for services and handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
