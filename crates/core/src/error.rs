use crate::forms::FieldErrors;

/// Policy-level errors. Every variant is recoverable at the request boundary.
///
/// The HTTP layer renders `NotOwner` and `NotFound` as the same 404.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Requester is not the author of this {entity}")]
    NotOwner { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by anything displayable.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
