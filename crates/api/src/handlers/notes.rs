//! Handlers for the notes site. Every page except the home page requires
//! login, and a requester only ever sees their own notes.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use ya_core::error::CoreError;
use ya_core::forms::{validate_note, FieldErrors, NoteDraft, NoteSubmission};
use ya_core::identity::{Identity, RequestContext};
use ya_core::ownership::ensure_can_mutate;
use ya_core::slug::{resolve_slug, slug_taken_message, SLUG_FIELD};
use ya_core::types::DbId;
use ya_core::visibility::{ensure_visible, filter_visible};
use ya_db::models::note::{CreateNote, Note, UpdateNote, SLUG_CONSTRAINT};
use ya_db::DbError;

use crate::error::AppResult;
use crate::extract::FormBody;
use crate::middleware::auth::{CurrentUser, RequireLogin};
use crate::response::{found, page, FormContext, Page};
use crate::state::AppState;

/// Landing page after every successful note mutation.
pub const SUCCESS_URL: &str = "/done/";

// ---------------------------------------------------------------------------
// Page contexts
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub user: Option<Identity>,
}

#[derive(Debug, Serialize)]
pub struct ListPage {
    pub object_list: Vec<Note>,
}

#[derive(Debug, Serialize)]
pub struct NotePage {
    pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct NoteFormPage {
    /// The note being edited; absent on the add page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    pub form: FormContext<NoteSubmission>,
}

#[derive(Debug, Serialize)]
pub struct DonePage {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a note visible to `requester`. Someone else's note is not found.
async fn load_note(state: &AppState, requester: &RequestContext, slug: &str) -> AppResult<Note> {
    let note = state
        .store
        .find_note_by_slug(slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Note", slug))?;
    ensure_visible(note, requester, slug).map_err(Into::into)
}

async fn load_own_note(
    state: &AppState,
    requester: &RequestContext,
    slug: &str,
) -> AppResult<Note> {
    let note = load_note(state, requester, slug).await?;
    ensure_can_mutate(&note, requester)?;
    Ok(note)
}

/// Validate a submission and resolve its slug for the note `editing`.
///
/// `Ok(Err(..))` carries form errors; the outer error is a storage failure.
async fn prepare(
    state: &AppState,
    submission: NoteSubmission,
    editing: Option<DbId>,
) -> AppResult<Result<(NoteDraft, String), FieldErrors>> {
    let draft = match validate_note(submission) {
        Ok(draft) => draft,
        Err(errors) => return Ok(Err(errors)),
    };
    let store = &state.store;
    let slug = resolve_slug(
        &draft.title,
        draft.slug.as_deref(),
        editing,
        |candidate| async move {
            let holder = store.find_note_by_slug(&candidate).await?;
            Ok::<_, DbError>(holder.map(|note| note.id))
        },
    )
    .await?;
    Ok(slug.map(|slug| (draft, slug)))
}

/// The slug error a lost insert/update race produces.
fn slug_conflict(err: DbError, slug: &str) -> AppResult<FieldErrors> {
    if err.is_unique_violation(SLUG_CONSTRAINT) {
        Ok(FieldErrors::single(SLUG_FIELD, slug_taken_message(slug)))
    } else {
        Err(err.into())
    }
}

fn form_page(note: Option<Note>, submission: NoteSubmission, errors: FieldErrors) -> Response {
    page(NoteFormPage {
        note,
        form: FormContext::with_errors(submission, errors),
    })
    .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn home(CurrentUser(requester): CurrentUser) -> Page<HomePage> {
    page(HomePage {
        user: requester.identity,
    })
}

/// GET /notes/
///
/// The requester's own notes in creation order.
pub async fn list(State(state): State<AppState>, user: RequireLogin) -> AppResult<Page<ListPage>> {
    let notes = state.store.list_notes_by_author(user.0.id).await?;
    let object_list = filter_visible(notes, &user.context());
    Ok(page(ListPage { object_list }))
}

/// GET /done/
pub async fn done(_user: RequireLogin) -> Page<DonePage> {
    page(DonePage { success: true })
}

/// GET /add/
pub async fn add_form(_user: RequireLogin) -> Page<NoteFormPage> {
    page(NoteFormPage {
        note: None,
        form: FormContext::blank(),
    })
}

/// POST /add/
///
/// An empty slug is derived from the title. A slug held by any other note,
/// whoever wrote it, is rejected.
pub async fn add(
    State(state): State<AppState>,
    user: RequireLogin,
    FormBody(submission): FormBody<NoteSubmission>,
) -> AppResult<Response> {
    let (draft, slug) = match prepare(&state, submission.clone(), None).await? {
        Ok(prepared) => prepared,
        Err(errors) => return Ok(form_page(None, submission, errors)),
    };

    let result = state
        .store
        .create_note(CreateNote {
            title: draft.title,
            text: draft.text,
            slug: slug.clone(),
            author_id: user.0.id,
        })
        .await;
    let note = match result {
        Ok(note) => note,
        Err(err) => return Ok(form_page(None, submission, slug_conflict(err, &slug)?)),
    };

    tracing::info!(
        user_id = user.0.id,
        note_id = note.id,
        slug = %note.slug,
        "Note created"
    );

    Ok(found(SUCCESS_URL))
}

/// GET /note/{slug}/
pub async fn detail(
    State(state): State<AppState>,
    user: RequireLogin,
    Path(slug): Path<String>,
) -> AppResult<Page<NotePage>> {
    let note = load_note(&state, &user.context(), &slug).await?;
    Ok(page(NotePage { note }))
}

/// GET /edit/{slug}/
pub async fn edit_form(
    State(state): State<AppState>,
    user: RequireLogin,
    Path(slug): Path<String>,
) -> AppResult<Page<NoteFormPage>> {
    let note = load_own_note(&state, &user.context(), &slug).await?;
    let form = FormContext::new(NoteSubmission {
        title: note.title.clone(),
        text: note.text.clone(),
        slug: Some(note.slug.clone()),
    });
    Ok(page(NoteFormPage {
        note: Some(note),
        form,
    }))
}

/// POST /edit/{slug}/
///
/// Keeping the note's own slug is not a collision.
pub async fn edit(
    State(state): State<AppState>,
    user: RequireLogin,
    Path(slug): Path<String>,
    FormBody(submission): FormBody<NoteSubmission>,
) -> AppResult<Response> {
    let note = load_own_note(&state, &user.context(), &slug).await?;

    let (draft, new_slug) = match prepare(&state, submission.clone(), Some(note.id)).await? {
        Ok(prepared) => prepared,
        Err(errors) => return Ok(form_page(Some(note), submission, errors)),
    };

    let result = state
        .store
        .update_note(
            note.id,
            UpdateNote {
                title: draft.title,
                text: draft.text,
                slug: new_slug.clone(),
            },
        )
        .await;
    let updated = match result {
        Ok(Some(updated)) => updated,
        Ok(None) => return Err(CoreError::not_found("Note", slug).into()),
        Err(err) => {
            let errors = slug_conflict(err, &new_slug)?;
            return Ok(form_page(Some(note), submission, errors));
        }
    };

    tracing::info!(
        user_id = user.0.id,
        note_id = updated.id,
        slug = %updated.slug,
        "Note updated"
    );

    Ok(found(SUCCESS_URL))
}

/// GET /delete/{slug}/
///
/// Confirmation page.
pub async fn delete_confirm(
    State(state): State<AppState>,
    user: RequireLogin,
    Path(slug): Path<String>,
) -> AppResult<Page<NotePage>> {
    let note = load_own_note(&state, &user.context(), &slug).await?;
    Ok(page(NotePage { note }))
}

/// POST|DELETE /delete/{slug}/
pub async fn delete(
    State(state): State<AppState>,
    user: RequireLogin,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let note = load_own_note(&state, &user.context(), &slug).await?;

    if !state.store.delete_note(note.id).await? {
        return Err(CoreError::not_found("Note", slug).into());
    }

    tracing::info!(user_id = user.0.id, note_id = note.id, "Note deleted");

    Ok(found(SUCCESS_URL))
}
