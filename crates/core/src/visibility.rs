//! Visibility filter for listings and detail views.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::identity::RequestContext;
use crate::ownership::Authored;
use crate::types::DbId;

/// Who may read a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Everyone, including anonymous requesters.
    Public,
    /// Only the record's author.
    AuthorOnly,
}

/// A record type with a fixed read audience.
pub trait Visible: Authored {
    const AUDIENCE: Audience;

    fn record_id(&self) -> DbId;
}

/// Whether `record` may be shown to `requester`.
pub fn visible_to<R: Visible + ?Sized>(record: &R, requester: &RequestContext) -> bool {
    match R::AUDIENCE {
        Audience::Public => true,
        Audience::AuthorOnly => requester
            .requester_id()
            .is_some_and(|id| id == record.author_id()),
    }
}

/// Keep the records `requester` may see, preserving order and dropping
/// repeated ids.
pub fn filter_visible<R: Visible>(records: Vec<R>, requester: &RequestContext) -> Vec<R> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| visible_to(r, requester) && seen.insert(r.record_id()))
        .collect()
}

/// Resolve a direct fetch: hidden records are reported as not found.
pub fn ensure_visible<R: Visible>(
    record: R,
    requester: &RequestContext,
    key: impl ToString,
) -> Result<R, CoreError> {
    if visible_to(&record, requester) {
        Ok(record)
    } else {
        Err(CoreError::not_found(R::ENTITY, key))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::identity::Identity;

    #[derive(Debug, Clone, PartialEq)]
    struct Public {
        id: DbId,
        author: DbId,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Private {
        id: DbId,
        author: DbId,
    }

    impl Authored for Public {
        const ENTITY: &'static str = "Public";
        fn author_id(&self) -> DbId {
            self.author
        }
    }

    impl Visible for Public {
        const AUDIENCE: Audience = Audience::Public;
        fn record_id(&self) -> DbId {
            self.id
        }
    }

    impl Authored for Private {
        const ENTITY: &'static str = "Private";
        fn author_id(&self) -> DbId {
            self.author
        }
    }

    impl Visible for Private {
        const AUDIENCE: Audience = Audience::AuthorOnly;
        fn record_id(&self) -> DbId {
            self.id
        }
    }

    fn as_user(id: DbId) -> RequestContext {
        RequestContext::authenticated(Identity {
            id,
            username: format!("user{id}"),
        })
    }

    #[test]
    fn public_records_are_visible_to_everyone() {
        let record = Public { id: 1, author: 1 };
        assert!(visible_to(&record, &RequestContext::anonymous()));
        assert!(visible_to(&record, &as_user(1)));
        assert!(visible_to(&record, &as_user(2)));
    }

    #[test]
    fn private_records_are_visible_to_author_only() {
        let record = Private { id: 1, author: 1 };
        assert!(visible_to(&record, &as_user(1)));
        assert!(!visible_to(&record, &as_user(2)));
        assert!(!visible_to(&record, &RequestContext::anonymous()));
    }

    #[test]
    fn filter_keeps_owned_in_order_without_duplicates() {
        let records = vec![
            Private { id: 3, author: 1 },
            Private { id: 1, author: 2 },
            Private { id: 2, author: 1 },
            Private { id: 3, author: 1 },
        ];
        let ids: Vec<DbId> = filter_visible(records, &as_user(1))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn hidden_direct_fetch_is_not_found() {
        let record = Private { id: 9, author: 1 };
        assert_matches!(
            ensure_visible(record.clone(), &as_user(2), "secret"),
            Err(CoreError::NotFound { entity: "Private", ref key }) if key == "secret"
        );
        let shown = ensure_visible(record.clone(), &as_user(1), "secret");
        assert_eq!(shown.unwrap(), record);
    }
}
