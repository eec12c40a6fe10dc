//! News article model.

use serde::Serialize;
use sqlx::FromRow;
use ya_core::types::{Date, DbId};

/// A row from the `news` table. Articles are never edited through the
/// applications.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub publication_date: Date,
}

/// DTO for seeding a news article. `publication_date` defaults to today.
#[derive(Debug, Clone)]
pub struct CreateNews {
    pub title: String,
    pub text: String,
    pub publication_date: Option<Date>,
}
