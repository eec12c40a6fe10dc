//! [`Storage`] backed by PostgreSQL.

use async_trait::async_trait;
use ya_core::types::DbId;

use crate::error::DbError;
use crate::models::comment::{Comment, CreateComment};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CommentRepo, NewsRepo, NoteRepo, UserRepo};
use crate::store::{CommentStore, NewsStore, NoteStore, Storage, UserStore};
use crate::DbPool;

/// Thin delegation from the store traits to the repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: CreateUser) -> Result<User, DbError> {
        Ok(UserRepo::create(&self.pool, &input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, DbError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }
}

#[async_trait]
impl NewsStore for PgStore {
    async fn create_news(&self, input: CreateNews) -> Result<News, DbError> {
        Ok(NewsRepo::create(&self.pool, &input).await?)
    }

    async fn find_news(&self, id: DbId) -> Result<Option<News>, DbError> {
        Ok(NewsRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_latest_news(&self, limit: usize) -> Result<Vec<News>, DbError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(NewsRepo::list_latest(&self.pool, limit).await?)
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn create_comment(&self, input: CreateComment) -> Result<Comment, DbError> {
        Ok(CommentRepo::create(&self.pool, &input).await?)
    }

    async fn find_comment(&self, id: DbId) -> Result<Option<Comment>, DbError> {
        Ok(CommentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_comments_for_news(&self, news_id: DbId) -> Result<Vec<Comment>, DbError> {
        Ok(CommentRepo::list_by_news(&self.pool, news_id).await?)
    }

    async fn update_comment_text(
        &self,
        id: DbId,
        text: &str,
    ) -> Result<Option<Comment>, DbError> {
        Ok(CommentRepo::update_text(&self.pool, id, text).await?)
    }

    async fn delete_comment(&self, id: DbId) -> Result<bool, DbError> {
        Ok(CommentRepo::delete(&self.pool, id).await?)
    }

    async fn count_comments(&self) -> Result<i64, DbError> {
        Ok(CommentRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create_note(&self, input: CreateNote) -> Result<Note, DbError> {
        Ok(NoteRepo::create(&self.pool, &input).await?)
    }

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, DbError> {
        Ok(NoteRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn list_notes_by_author(&self, author_id: DbId) -> Result<Vec<Note>, DbError> {
        Ok(NoteRepo::list_by_author(&self.pool, author_id).await?)
    }

    async fn update_note(&self, id: DbId, input: UpdateNote) -> Result<Option<Note>, DbError> {
        Ok(NoteRepo::update(&self.pool, id, &input).await?)
    }

    async fn delete_note(&self, id: DbId) -> Result<bool, DbError> {
        Ok(NoteRepo::delete(&self.pool, id).await?)
    }

    async fn count_notes(&self) -> Result<i64, DbError> {
        Ok(NoteRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl Storage for PgStore {
    async fn health_check(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}
