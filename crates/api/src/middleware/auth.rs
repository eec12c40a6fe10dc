//! Session extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ya_core::identity::{Identity, RequestContext};

use crate::auth::jwt::validate_token;
use crate::auth::session::token_from_headers;
use crate::error::AppError;
use crate::state::AppState;

/// Who is making the request, anonymous or not.
///
/// A missing, invalid or expired token, or a token for a user that no longer
/// exists, all resolve to an anonymous context. The identity always comes from
/// the stored user row, never from the token alone.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub RequestContext);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(&parts.headers) else {
            return Ok(CurrentUser(RequestContext::anonymous()));
        };

        let claims = match validate_token(&token, &state.config.session) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
                return Ok(CurrentUser(RequestContext::anonymous()));
            }
        };

        let context = match state.store.find_user_by_id(claims.sub).await? {
            Some(user) => RequestContext::authenticated(user.identity()),
            None => RequestContext::anonymous(),
        };
        Ok(CurrentUser(context))
    }
}

/// An authenticated requester. Anonymous requests are redirected to the
/// login page with the requested path as `next`.
///
/// ```ignore
/// async fn my_handler(RequireLogin(identity): RequireLogin) -> AppResult<Page<()>> {
///     tracing::info!(user_id = identity.id, "handling request");
///     Ok(page(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireLogin(pub Identity);

impl RequireLogin {
    /// The requester as a policy context.
    pub fn context(&self) -> RequestContext {
        RequestContext::authenticated(self.0.clone())
    }
}

impl FromRequestParts<AppState> for RequireLogin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(context) = CurrentUser::from_request_parts(parts, state).await?;
        match context.identity {
            Some(identity) => Ok(RequireLogin(identity)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| parts.uri.path().to_string());
                Err(AppError::LoginRequired { next })
            }
        }
    }
}
