//! Ownership guard: who may edit or delete a record.

use crate::error::CoreError;
use crate::identity::RequestContext;
use crate::types::DbId;

/// A record owned by exactly one user.
pub trait Authored {
    /// Entity name used in error messages (e.g. `"Comment"`).
    const ENTITY: &'static str;

    fn author_id(&self) -> DbId;
}

/// `true` iff the requester is authenticated and authored `record`.
///
/// Anonymous requesters are always refused.
pub fn can_mutate<R: Authored + ?Sized>(record: &R, requester: &RequestContext) -> bool {
    requester
        .requester_id()
        .is_some_and(|id| id == record.author_id())
}

/// Like [`can_mutate`], but reports why the mutation is refused.
///
/// Returns [`CoreError::Unauthenticated`] for anonymous requesters and
/// [`CoreError::NotOwner`] when someone else authored the record.
pub fn ensure_can_mutate<R: Authored + ?Sized>(
    record: &R,
    requester: &RequestContext,
) -> Result<(), CoreError> {
    let identity = requester.require_identity()?;
    if identity.id != record.author_id() {
        return Err(CoreError::NotOwner { entity: R::ENTITY });
    }
    Ok(())
}
