//! Note model: private to its author, addressed by a global slug.

use serde::Serialize;
use sqlx::FromRow;
use ya_core::ownership::Authored;
use ya_core::types::DbId;
use ya_core::visibility::{Audience, Visible};

/// Name of the unique constraint on `notes.slug`.
pub const SLUG_CONSTRAINT: &str = "uq_notes_slug";

/// A row from the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: DbId,
}

impl Authored for Note {
    const ENTITY: &'static str = "Note";

    fn author_id(&self) -> DbId {
        self.author_id
    }
}

impl Visible for Note {
    const AUDIENCE: Audience = Audience::AuthorOnly;

    fn record_id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a note. The slug is already resolved.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: DbId,
}

/// DTO for editing a note. The author cannot change.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}
