//! Error types for the AlgoBell server.
//!
//! This module provides the error handling system for the application, with specialized
//! error types for different domains (configuration, upstream providers, notification
//! delivery). All errors implement `IntoResponse` for Axum HTTP responses and use
//! `thiserror` for ergonomic error definitions.

pub mod config;
pub mod notify;
pub mod provider;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{config::ConfigError, notify::NotifyError, provider::ProviderError},
    model::api::ErrorDto,
};

/// Main error type for the AlgoBell server.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// unified error type. `thiserror`'s `#[from]` attribute enables automatic conversion
/// from underlying error types via the `?` operator. The `IntoResponse` implementation
/// maps errors to appropriate HTTP responses for API consumers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Upstream contest provider error (request, status, or payload issues).
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// Notification delivery error (missing contact data, transport failure).
    #[error(transparent)]
    NotifyError(#[from] NotifyError),
    /// Referenced contest does not exist in the canonical store.
    #[error("Contest {0} not found")]
    ContestNotFound(i32),
    /// Referenced user profile does not exist.
    #[error("User {0} not found")]
    UserNotFound(i32),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in AlgoBell's code.
    #[error("Internal error with AlgoBell's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// I/O error (listener binding, server shutdown).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// Missing users and contests map to 404 responses with the error message in the body.
/// Everything else is treated as an internal server error (500) with logging; the
/// response body carries a generic message to avoid leaking implementation details.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            err @ (Self::ContestNotFound(_) | Self::UserNotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error
/// response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client. Used as a fallback for errors that don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
