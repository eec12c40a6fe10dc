use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use ya_core::error::CoreError;
use ya_db::DbError;

use crate::auth::{login_redirect_url, LOGIN_URL};
use crate::response::found;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for policy errors and [`DbError`] for storage errors,
/// and adds HTTP-specific variants. Implements [`IntoResponse`] so every
/// handler produces the same redirects and JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A policy-level error from `ya_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from `ya_db`.
    #[error(transparent)]
    Store(#[from] DbError),

    /// An anonymous request for a login-only page; `next` is the requested
    /// path and query.
    #[error("Login required for {next}")]
    LoginRequired { next: String },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message shared by every 404 so a missing record and someone else's record
/// are indistinguishable.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Redirects to the login page ---
            AppError::LoginRequired { next } => return found(&login_redirect_url(next)),

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Unauthenticated => return found(LOGIN_URL),
                CoreError::NotFound { .. } | CoreError::NotOwner { .. } => {
                    tracing::debug!(error = %core, "Responding 404");
                    not_found()
                }
                CoreError::Validation(errors) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    errors.to_string(),
                ),
            },

            // --- Storage errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn not_found() -> (StatusCode, &'static str, String) {
    (
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        NOT_FOUND_MESSAGE.to_string(),
    )
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a storage error into an HTTP status, error code, and message.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - A missing referenced row maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &DbError) -> (StatusCode, &'static str, String) {
    match err {
        DbError::UniqueViolation { constraint } if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        DbError::ForeignKeyViolation { .. } => not_found(),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
