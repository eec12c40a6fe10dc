//! Repository for the `news` table.

use sqlx::PgPool;
use ya_core::types::DbId;

use crate::models::news::{CreateNews, News};

const COLUMNS: &str = "id, title, text, publication_date";

pub struct NewsRepo;

impl NewsRepo {
    /// Insert an article. A missing date defaults to `CURRENT_DATE`.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, text, publication_date)
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.text)
            .bind(input.publication_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The `limit` most recent articles, newest publication date first.
    pub async fn list_latest(pool: &PgPool, limit: i64) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news
             ORDER BY publication_date DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
