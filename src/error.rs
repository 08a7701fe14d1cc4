//! # Error Handling
//!
//! This module defines custom error types for the application and handles
//! converting them into HTTP responses.
//!
//! Two variants belong to the middleware rather than to the demo handlers:
//! - [`AppError::LoginRequired`] is how the login guard halts a request. It renders
//!   as a redirect to the login page.
//! - [`AppError::MiddlewareMissing`] is returned when a handler asks for the
//!   per-request model or auth context but the middleware that provides it was
//!   never installed on the route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
///
/// ## The `#[from]` attribute
/// This enables automatic conversion using the `?` operator. For example:
/// ```ignore
/// session.save().await?;
/// // The ? converts tower_sessions::session::Error into AppError::Session
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session store failures (load, decode, or save)
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found errors (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication errors on API calls (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The current request is not authenticated and must go through the login page.
    ///
    /// `location` already carries the return parameter.
    #[error("Login required, redirecting to {location}")]
    LoginRequired { location: String },

    /// A request extension was read before the middleware that sets it ran
    #[error("{0} middleware not installed")]
    MiddlewareMissing(&'static str),

    /// Internal server errors (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Convert AppError into an HTTP response
///
/// ## How it works
/// 1. Match the error type
/// 2. Log detailed error information (for server debugging)
/// 3. Determine appropriate HTTP status code
/// 4. Create user-friendly error message (hide internal details)
/// 5. Return JSON response with error
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error".to_string())
            }
            AppError::LoginRequired { location } => {
                tracing::debug!("Redirecting unauthenticated request to {}", location);
                return Redirect::to(location).into_response();
            }
            AppError::MiddlewareMissing(_) => {
                // Route wiring mistake; the message names the missing layer
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
