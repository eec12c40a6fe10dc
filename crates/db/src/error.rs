/// Errors surfaced by every [`crate::store::Storage`] implementation.
///
/// Constraint violations are split out so callers can turn them into form
/// errors instead of a 500.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Referenced row does not exist: {constraint}")]
    ForeignKeyViolation { constraint: String },
}

impl DbError {
    /// Whether this is a violation of the named unique constraint.
    pub fn is_unique_violation(&self, name: &str) -> bool {
        matches!(self, DbError::UniqueViolation { constraint } if constraint == name)
    }
}

impl From<sqlx::Error> for DbError {
    /// Classify PostgreSQL constraint errors by SQLSTATE:
    /// `23505` unique violation, `23503` foreign key violation.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some("23505") => return DbError::UniqueViolation { constraint },
                Some("23503") => return DbError::ForeignKeyViolation { constraint },
                _ => {}
            }
        }
        DbError::Sqlx(err)
    }
}
