//! In-memory [`Storage`] used by tests and local runs without a database.
//!
//! Every operation takes the single lock once, so the uniqueness and
//! foreign-key checks are atomic with the write they guard. Constraint
//! failures are reported with the same constraint names as the SQL schema.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use ya_core::types::DbId;

use crate::error::DbError;
use crate::models::comment::{Comment, CreateComment, NEWS_FOREIGN_KEY};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote, SLUG_CONSTRAINT};
use crate::models::user::{CreateUser, User, USERNAME_CONSTRAINT};
use crate::store::{CommentStore, NewsStore, NoteStore, Storage, UserStore};

const AUTHOR_FOREIGN_KEY: &str = "fk_author_user";

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<DbId, User>,
    news: BTreeMap<DbId, News>,
    comments: BTreeMap<DbId, Comment>,
    notes: BTreeMap<DbId, Note>,
    last_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn require_user(&self, id: DbId) -> Result<(), DbError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DbError::ForeignKeyViolation {
                constraint: AUTHOR_FOREIGN_KEY.to_string(),
            })
        }
    }

    fn slug_taken(&self, slug: &str, except: Option<DbId>) -> bool {
        self.notes
            .values()
            .any(|n| n.slug == slug && Some(n.id) != except)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an article together with its comments.
    pub async fn delete_news(&self, id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        tables.comments.retain(|_, c| c.news_id != id);
        tables.news.remove(&id).is_some()
    }

    /// Remove a user together with everything they wrote.
    pub async fn delete_user(&self, id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        tables.comments.retain(|_, c| c.author_id != id);
        tables.notes.retain(|_, n| n.author_id != id);
        tables.users.remove(&id).is_some()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: CreateUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == input.username) {
            return Err(DbError::UniqueViolation {
                constraint: USERNAME_CONSTRAINT.to_string(),
            });
        }
        let user = User {
            id: tables.next_id(),
            username: input.username,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, DbError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn create_news(&self, input: CreateNews) -> Result<News, DbError> {
        let mut tables = self.tables.write().await;
        let news = News {
            id: tables.next_id(),
            title: input.title,
            text: input.text,
            publication_date: input
                .publication_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        };
        tables.news.insert(news.id, news.clone());
        Ok(news)
    }

    async fn find_news(&self, id: DbId) -> Result<Option<News>, DbError> {
        Ok(self.tables.read().await.news.get(&id).cloned())
    }

    async fn list_latest_news(&self, limit: usize) -> Result<Vec<News>, DbError> {
        let tables = self.tables.read().await;
        let mut news: Vec<News> = tables.news.values().cloned().collect();
        news.sort_by(|a, b| {
            b.publication_date
                .cmp(&a.publication_date)
                .then(b.id.cmp(&a.id))
        });
        news.truncate(limit);
        Ok(news)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(&self, input: CreateComment) -> Result<Comment, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.news.contains_key(&input.news_id) {
            return Err(DbError::ForeignKeyViolation {
                constraint: NEWS_FOREIGN_KEY.to_string(),
            });
        }
        tables.require_user(input.author_id)?;
        let comment = Comment {
            id: tables.next_id(),
            news_id: input.news_id,
            author_id: input.author_id,
            text: input.text,
            created_at: input.created_at.unwrap_or_else(Utc::now),
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: DbId) -> Result<Option<Comment>, DbError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn list_comments_for_news(&self, news_id: DbId) -> Result<Vec<Comment>, DbError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.news_id == news_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn update_comment_text(
        &self,
        id: DbId,
        text: &str,
    ) -> Result<Option<Comment>, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.comments.get_mut(&id).map(|comment| {
            comment.text = text.to_string();
            comment.clone()
        }))
    }

    async fn delete_comment(&self, id: DbId) -> Result<bool, DbError> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }

    async fn count_comments(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.comments.len() as i64)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, input: CreateNote) -> Result<Note, DbError> {
        let mut tables = self.tables.write().await;
        if tables.slug_taken(&input.slug, None) {
            return Err(DbError::UniqueViolation {
                constraint: SLUG_CONSTRAINT.to_string(),
            });
        }
        tables.require_user(input.author_id)?;
        let note = Note {
            id: tables.next_id(),
            title: input.title,
            text: input.text,
            slug: input.slug,
            author_id: input.author_id,
        };
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.notes.values().find(|n| n.slug == slug).cloned())
    }

    async fn list_notes_by_author(&self, author_id: DbId) -> Result<Vec<Note>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .values()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn update_note(&self, id: DbId, input: UpdateNote) -> Result<Option<Note>, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.notes.contains_key(&id) {
            return Ok(None);
        }
        if tables.slug_taken(&input.slug, Some(id)) {
            return Err(DbError::UniqueViolation {
                constraint: SLUG_CONSTRAINT.to_string(),
            });
        }
        Ok(tables.notes.get_mut(&id).map(|note| {
            note.title = input.title;
            note.text = input.text;
            note.slug = input.slug;
            note.clone()
        }))
    }

    async fn delete_note(&self, id: DbId) -> Result<bool, DbError> {
        Ok(self.tables.write().await.notes.remove(&id).is_some())
    }

    async fn count_notes(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.notes.len() as i64)
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn health_check(&self) -> bool {
        true
    }
}
