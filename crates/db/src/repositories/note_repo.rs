//! Repository for the `notes` table.
//!
//! Slug uniqueness is enforced by the `uq_notes_slug` constraint; inserts and
//! updates that violate it fail with a database error that
//! [`crate::DbError`] classifies as a unique violation.

use sqlx::PgPool;
use ya_core::types::DbId;

use crate::models::note::{CreateNote, Note, UpdateNote};

const COLUMNS: &str = "id, title, text, slug, author_id";

pub struct NoteRepo;

impl NoteRepo {
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (title, text, slug, author_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.text)
            .bind(&input.slug)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE slug = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// All notes written by `author_id`, in creation order.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE author_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite title, text and slug. Returns `None` if the row does not
    /// exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = $2,
                text = $3,
                slug = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.text)
            .bind(&input.slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await
    }
}
