use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Account pages, mounted identically on both sites.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login/", get(users::login_form).post(users::login))
        .route("/auth/logout/", get(users::logout).post(users::logout))
        .route("/auth/signup/", get(users::signup_form).post(users::signup))
}
