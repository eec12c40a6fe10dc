//! Shared response types for page handlers.
//!
//! Every page responds with its context in a `{ "data": ... }` envelope.
//! Use [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`.

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use ya_core::forms::FieldErrors;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Handler return type for pages.
pub type Page<T> = Json<DataResponse<T>>;

/// Wrap a page context in the envelope.
pub fn page<T: Serialize>(data: T) -> Page<T> {
    Json(DataResponse { data })
}

/// `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// A form as a page shows it: the values to pre-fill and the errors from
/// the last submission.
#[derive(Debug, Serialize)]
pub struct FormContext<T: Serialize> {
    pub initial: T,
    pub errors: FieldErrors,
}

impl<T: Serialize> FormContext<T> {
    /// An unbound form pre-filled with `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            initial,
            errors: FieldErrors::new(),
        }
    }

    /// A rejected submission shown back with its errors.
    pub fn with_errors(initial: T, errors: FieldErrors) -> Self {
        Self { initial, errors }
    }
}

impl<T: Serialize + Default> FormContext<T> {
    pub fn blank() -> Self {
        Self::new(T::default())
    }
}
