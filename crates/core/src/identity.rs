//! Requester identity.
//!
//! [`Identity`] is the single canonical representation of an authenticated
//! user. Ownership checks compare [`Identity::id`] against a record's
//! `author_id` and nothing else.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: DbId,
    pub username: String,
}

/// Who is making the current request. `identity` is `None` for anonymous
/// requesters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub identity: Option<Identity>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The requester's id, if authenticated.
    pub fn requester_id(&self) -> Option<DbId> {
        self.identity.as_ref().map(|i| i.id)
    }

    /// Return the identity or [`CoreError::Unauthenticated`].
    pub fn require_identity(&self) -> Result<&Identity, CoreError> {
        self.identity.as_ref().ok_or(CoreError::Unauthenticated)
    }
}

impl From<Identity> for RequestContext {
    fn from(identity: Identity) -> Self {
        Self::authenticated(identity)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn anonymous_has_no_identity() {
        let ctx = RequestContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.requester_id(), None);
        assert_matches!(ctx.require_identity(), Err(CoreError::Unauthenticated));
    }

    #[test]
    fn authenticated_exposes_identity() {
        let ctx: RequestContext = Identity {
            id: 7,
            username: "reader".into(),
        }
        .into();
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.requester_id(), Some(7));
        assert_eq!(ctx.require_identity().unwrap().username, "reader");
    }
}
