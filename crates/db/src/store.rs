//! Storage interfaces used by the HTTP layer.
//!
//! Handlers hold an `Arc<dyn Storage>` so the same routes run against
//! PostgreSQL in production and [`crate::MemoryStore`] in tests.

use async_trait::async_trait;
use ya_core::types::DbId;

use crate::error::DbError;
use crate::models::comment::{Comment, CreateComment};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::models::user::{CreateUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with a unique violation on `uq_users_username` if the name is
    /// taken.
    async fn create_user(&self, input: CreateUser) -> Result<User, DbError>;

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, DbError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
}

#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn create_news(&self, input: CreateNews) -> Result<News, DbError>;

    async fn find_news(&self, id: DbId) -> Result<Option<News>, DbError>;

    /// Newest first by publication date, ties broken by id descending.
    async fn list_latest_news(&self, limit: usize) -> Result<Vec<News>, DbError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Fails with a foreign key violation on `fk_comments_news` if the
    /// article does not exist.
    async fn create_comment(&self, input: CreateComment) -> Result<Comment, DbError>;

    async fn find_comment(&self, id: DbId) -> Result<Option<Comment>, DbError>;

    /// Oldest first, ties broken by id.
    async fn list_comments_for_news(&self, news_id: DbId) -> Result<Vec<Comment>, DbError>;

    async fn update_comment_text(&self, id: DbId, text: &str)
        -> Result<Option<Comment>, DbError>;

    async fn delete_comment(&self, id: DbId) -> Result<bool, DbError>;

    async fn count_comments(&self) -> Result<i64, DbError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fails with a unique violation on `uq_notes_slug` if the slug is taken.
    async fn create_note(&self, input: CreateNote) -> Result<Note, DbError>;

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, DbError>;

    /// The author's notes in creation order.
    async fn list_notes_by_author(&self, author_id: DbId) -> Result<Vec<Note>, DbError>;

    async fn update_note(&self, id: DbId, input: UpdateNote) -> Result<Option<Note>, DbError>;

    async fn delete_note(&self, id: DbId) -> Result<bool, DbError>;

    async fn count_notes(&self) -> Result<i64, DbError>;
}

/// Everything the applications need from persistence.
#[async_trait]
pub trait Storage: UserStore + NewsStore + CommentStore + NoteStore {
    /// Whether the backing store is reachable.
    async fn health_check(&self) -> bool;
}
