//! Comment model: public, author-mutable child of a news article.

use serde::Serialize;
use sqlx::FromRow;
use ya_core::ownership::Authored;
use ya_core::types::{DbId, Timestamp};
use ya_core::visibility::{Audience, Visible};

/// Name of the foreign key from `comments.news_id` to `news.id`.
pub const NEWS_FOREIGN_KEY: &str = "fk_comments_news";

/// A row from the `comments` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub news_id: DbId,
    pub author_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
}

impl Authored for Comment {
    const ENTITY: &'static str = "Comment";

    fn author_id(&self) -> DbId {
        self.author_id
    }
}

impl Visible for Comment {
    const AUDIENCE: Audience = Audience::Public;

    fn record_id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a comment. `created_at` defaults to now; seeding code
/// may set it explicitly.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub news_id: DbId,
    pub author_id: DbId,
    pub text: String,
    pub created_at: Option<Timestamp>,
}
