//! Content moderation for comment text.

/// Substrings that may not appear anywhere in a comment. Matching is
/// case-sensitive.
pub const BAD_WORDS: &[&str] = &["редиска", "негодяй"];

/// Message attached to the `text` field when a banned word is found.
pub const WARNING: &str = "Не ругайтесь!";

/// Text refused by [`validate_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// The banned substring that matched first.
    pub word: &'static str,
}

impl Rejected {
    /// The user-facing message, always [`WARNING`].
    pub fn message(&self) -> &'static str {
        WARNING
    }
}

/// Reject `text` if it contains any entry of [`BAD_WORDS`].
///
/// Accepted text is not transformed in any way.
pub fn validate_text(text: &str) -> Result<(), Rejected> {
    match BAD_WORDS.iter().copied().find(|word| text.contains(word)) {
        Some(word) => Err(Rejected { word }),
        None => Ok(()),
    }
}
