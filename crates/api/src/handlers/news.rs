//! Handlers for the news site: home page, article detail with comments,
//! and author-only comment edit/delete.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use ya_core::error::CoreError;
use ya_core::forms::{validate_comment, CommentSubmission};
use ya_core::identity::RequestContext;
use ya_core::ownership::ensure_can_mutate;
use ya_core::types::DbId;
use ya_core::visibility::filter_visible;
use ya_db::models::comment::{Comment, CreateComment};
use ya_db::models::news::News;

use crate::error::AppResult;
use crate::extract::{FormBody, IdPath};
use crate::middleware::auth::{CurrentUser, RequireLogin};
use crate::response::{found, page, FormContext, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Page contexts
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub object_list: Vec<News>,
}

#[derive(Debug, Serialize)]
pub struct DetailPage {
    pub news: News,
    /// Oldest first.
    pub comments: Vec<Comment>,
    /// Present only for authenticated requesters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormContext<CommentSubmission>>,
}

#[derive(Debug, Serialize)]
pub struct CommentFormPage {
    pub comment: Comment,
    pub form: FormContext<CommentSubmission>,
}

#[derive(Debug, Serialize)]
pub struct CommentDeletePage {
    pub comment: Comment,
}

/// Anchor of the comment list on an article page.
pub fn comments_url(news_id: DbId) -> String {
    format!("/news/{news_id}/#comments")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_news(state: &AppState, id: DbId) -> AppResult<News> {
    state
        .store
        .find_news(id)
        .await?
        .ok_or_else(|| CoreError::not_found("News", id).into())
}

/// Load a comment the requester may edit or delete. Someone else's comment
/// is reported the same way as a missing one.
async fn load_own_comment(
    state: &AppState,
    requester: &RequestContext,
    id: DbId,
) -> AppResult<Comment> {
    let comment = state
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Comment", id))?;
    ensure_can_mutate(&comment, requester)?;
    Ok(comment)
}

async fn detail_page(
    state: &AppState,
    requester: &RequestContext,
    news: News,
    form: Option<FormContext<CommentSubmission>>,
) -> AppResult<DetailPage> {
    let comments = state.store.list_comments_for_news(news.id).await?;
    let comments = filter_visible(comments, requester);
    let form = if requester.is_authenticated() {
        Some(form.unwrap_or_else(FormContext::blank))
    } else {
        None
    };
    Ok(DetailPage {
        news,
        comments,
        form,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// The latest articles, newest first.
pub async fn home(State(state): State<AppState>) -> AppResult<Page<HomePage>> {
    let object_list = state
        .store
        .list_latest_news(state.config.news_count_on_home_page)
        .await?;
    Ok(page(HomePage { object_list }))
}

/// GET /news/{id}/
pub async fn detail(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    IdPath(id): IdPath,
) -> AppResult<Page<DetailPage>> {
    let news = load_news(&state, id).await?;
    Ok(page(detail_page(&state, &requester, news, None).await?))
}

/// POST /news/{id}/
///
/// Add a comment. Rejected text re-renders the article with the form errors.
pub async fn create_comment(
    State(state): State<AppState>,
    user: RequireLogin,
    IdPath(id): IdPath,
    FormBody(submission): FormBody<CommentSubmission>,
) -> AppResult<Response> {
    let news = load_news(&state, id).await?;

    let valid = match validate_comment(submission.clone()) {
        Ok(valid) => valid,
        Err(errors) => {
            let form = FormContext::with_errors(submission, errors);
            let context = detail_page(&state, &user.context(), news, Some(form)).await?;
            return Ok(page(context).into_response());
        }
    };

    let comment = state
        .store
        .create_comment(CreateComment {
            news_id: news.id,
            author_id: user.0.id,
            text: valid.text,
            created_at: None,
        })
        .await?;

    tracing::info!(
        user_id = user.0.id,
        news_id = news.id,
        comment_id = comment.id,
        "Comment created"
    );

    Ok(found(&comments_url(news.id)))
}

/// GET /edit_comment/{id}/
pub async fn edit_comment_form(
    State(state): State<AppState>,
    user: RequireLogin,
    IdPath(id): IdPath,
) -> AppResult<Page<CommentFormPage>> {
    let comment = load_own_comment(&state, &user.context(), id).await?;
    let form = FormContext::new(CommentSubmission {
        text: comment.text.clone(),
    });
    Ok(page(CommentFormPage { comment, form }))
}

/// POST /edit_comment/{id}/
pub async fn update_comment(
    State(state): State<AppState>,
    user: RequireLogin,
    IdPath(id): IdPath,
    FormBody(submission): FormBody<CommentSubmission>,
) -> AppResult<Response> {
    let comment = load_own_comment(&state, &user.context(), id).await?;

    let valid = match validate_comment(submission.clone()) {
        Ok(valid) => valid,
        Err(errors) => {
            let form = FormContext::with_errors(submission, errors);
            return Ok(page(CommentFormPage { comment, form }).into_response());
        }
    };

    let updated = state
        .store
        .update_comment_text(comment.id, &valid.text)
        .await?
        .ok_or_else(|| CoreError::not_found("Comment", id))?;

    tracing::info!(
        user_id = user.0.id,
        comment_id = updated.id,
        "Comment updated"
    );

    Ok(found(&comments_url(updated.news_id)))
}

/// GET /delete_comment/{id}/
///
/// Confirmation page.
pub async fn delete_comment_confirm(
    State(state): State<AppState>,
    user: RequireLogin,
    IdPath(id): IdPath,
) -> AppResult<Page<CommentDeletePage>> {
    let comment = load_own_comment(&state, &user.context(), id).await?;
    Ok(page(CommentDeletePage { comment }))
}

/// POST|DELETE /delete_comment/{id}/
pub async fn delete_comment(
    State(state): State<AppState>,
    user: RequireLogin,
    IdPath(id): IdPath,
) -> AppResult<Response> {
    let comment = load_own_comment(&state, &user.context(), id).await?;

    if !state.store.delete_comment(comment.id).await? {
        return Err(CoreError::not_found("Comment", id).into());
    }

    tracing::info!(
        user_id = user.0.id,
        comment_id = comment.id,
        "Comment deleted"
    );

    Ok(found(&comments_url(comment.news_id)))
}
