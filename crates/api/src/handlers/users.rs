//! Account pages under `/auth/`: login, logout and signup.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use ya_core::forms::{
    validate_login, validate_signup, FieldErrors, LoginSubmission, SignupSubmission,
    NON_FIELD_ERRORS,
};
use ya_core::identity::Identity;
use ya_db::models::user::{CreateUser, USERNAME_CONSTRAINT};

use crate::auth::jwt::generate_session_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{safe_next, LOGIN_URL};
use crate::error::{AppError, AppResult};
use crate::extract::FormBody;
use crate::middleware::auth::CurrentUser;
use crate::response::{found, page, FormContext, Page};
use crate::state::AppState;

/// Shown when the username is unknown or the password is wrong.
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";

// ---------------------------------------------------------------------------
// Request / page types
// ---------------------------------------------------------------------------

/// `?next=` on the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextParam {
    pub next: Option<String>,
}

/// What a re-rendered account form shows again. Passwords are never echoed.
#[derive(Debug, Default, Serialize)]
pub struct AccountInitial {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub form: FormContext<AccountInitial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub user: Option<Identity>,
}

#[derive(Debug, Serialize)]
pub struct SignupPage {
    pub form: FormContext<AccountInitial>,
}

#[derive(Debug, Serialize)]
pub struct LogoutPage {
    pub logged_out: bool,
}

fn login_page(username: String, errors: FieldErrors, next: Option<String>) -> Response {
    page(LoginPage {
        form: FormContext::with_errors(AccountInitial { username }, errors),
        next,
        user: None,
    })
    .into_response()
}

fn signup_page(username: String, errors: FieldErrors) -> Response {
    page(SignupPage {
        form: FormContext::with_errors(AccountInitial { username }, errors),
    })
    .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /auth/login/
pub async fn login_form(
    CurrentUser(requester): CurrentUser,
    Query(params): Query<NextParam>,
) -> Page<LoginPage> {
    page(LoginPage {
        form: FormContext::blank(),
        next: params.next,
        user: requester.identity,
    })
}

/// POST /auth/login/
///
/// On success sets the session cookie and redirects to `next` when it is a
/// local path.
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<NextParam>,
    FormBody(submission): FormBody<LoginSubmission>,
) -> AppResult<Response> {
    let username = submission.username.clone();
    let credentials = match validate_login(submission) {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(login_page(username, errors, params.next)),
    };

    let user = state
        .store
        .find_user_by_username(&credentials.username)
        .await?;
    let verified = match &user {
        Some(user) => verify_password(&credentials.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?,
        None => false,
    };
    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::debug!(username = %credentials.username, "Rejected login");
            let errors = FieldErrors::single(NON_FIELD_ERRORS, INVALID_LOGIN_MESSAGE);
            return Ok(login_page(username, errors, params.next));
        }
    };

    let identity = user.identity();
    let token = generate_session_token(&identity, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = identity.id, "User logged in");

    let mut response = found(safe_next(params.next.as_deref()));
    let cookie = session_cookie(&token, &state.config.session)
        .parse()
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// GET|POST /auth/logout/
///
/// Always clears the session cookie.
pub async fn logout(CurrentUser(requester): CurrentUser) -> AppResult<Response> {
    if let Some(identity) = requester.identity() {
        tracing::info!(user_id = identity.id, "User logged out");
    }
    let mut response = page(LogoutPage { logged_out: true }).into_response();
    let cookie = clear_session_cookie()
        .parse()
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// GET /auth/signup/
pub async fn signup_form() -> Page<SignupPage> {
    page(SignupPage {
        form: FormContext::blank(),
    })
}

/// POST /auth/signup/
///
/// Creates the account and sends the new user to the login page.
pub async fn signup(
    State(state): State<AppState>,
    FormBody(submission): FormBody<SignupSubmission>,
) -> AppResult<Response> {
    let username = submission.username.clone();
    let account = match validate_signup(submission) {
        Ok(account) => account,
        Err(errors) => return Ok(signup_page(username, errors)),
    };

    if let Err(msg) = validate_password_strength(&account.password, MIN_PASSWORD_LENGTH) {
        return Ok(signup_page(username, FieldErrors::single("password2", msg)));
    }

    let password_hash = hash_password(&account.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let result = state
        .store
        .create_user(CreateUser {
            username: account.username,
            password_hash,
        })
        .await;
    let user = match result {
        Ok(user) => user,
        Err(err) if err.is_unique_violation(USERNAME_CONSTRAINT) => {
            let errors = FieldErrors::single("username", USERNAME_TAKEN_MESSAGE);
            return Ok(signup_page(username, errors));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    Ok(found(LOGIN_URL))
}
