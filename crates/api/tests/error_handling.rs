//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use ya_api::error::{AppError, NOT_FOUND_MESSAGE};
use ya_core::error::CoreError;
use ya_core::forms::FieldErrors;
use ya_db::DbError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_owner_and_not_found_share_one_404() {
    let (status_a, json_a) =
        error_to_response(CoreError::NotOwner { entity: "Note" }.into()).await;
    let (status_b, json_b) = error_to_response(CoreError::not_found("Note", "secret").into()).await;

    assert_eq!(status_a, StatusCode::NOT_FOUND);
    assert_eq!(status_b, StatusCode::NOT_FOUND);
    assert_eq!(json_a, json_b);
    assert_eq!(json_a["code"], "NOT_FOUND");
    assert_eq!(json_a["error"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn login_required_redirects_with_next() {
    let response = AppError::LoginRequired {
        next: "/edit/test-note/".into(),
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/auth/login/?next=/edit/test-note/"
    );
}

#[tokio::test]
async fn bare_unauthenticated_redirects_to_login() {
    let response = AppError::Core(CoreError::Unauthenticated).into_response();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/auth/login/");
}

#[tokio::test]
async fn unrendered_validation_error_returns_400() {
    let err = CoreError::Validation(FieldErrors::single("text", "Не ругайтесь!"));

    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "text: Не ругайтесь!");
}

#[tokio::test]
async fn unique_violation_returns_409() {
    let err = DbError::UniqueViolation {
        constraint: "uq_notes_slug".into(),
    };

    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
