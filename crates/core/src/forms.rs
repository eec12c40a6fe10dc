//! Typed form submissions and their validation.
//!
//! Each submission struct is deserialized straight from a form body and
//! turned into a validated value by a pure function. Failures are collected
//! into [`FieldErrors`], which is what a re-rendered form shows next to each
//! field.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::moderation;

/// Message for a missing or blank required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Field name for errors that do not belong to one field.
pub const NON_FIELD_ERRORS: &str = "__all__";

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Field name → messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding one message for one field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field` (empty if none).
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(&field, message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Run the derived validator rules and collect their errors.
fn derived_errors<T: Validate>(value: &T) -> FieldErrors {
    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

// ---------------------------------------------------------------------------
// Custom field rules
// ---------------------------------------------------------------------------

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Explicit slugs may use letters, digits, underscores and hyphens. An empty
/// value means "derive it from the title" and is accepted here.
fn slug_chars(value: &str) -> Result<(), ValidationError> {
    if value
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Ok(());
    }
    Err(with_message(
        "invalid_slug",
        "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
    ))
}

fn username_rules(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_' | ' ');
    if value.chars().all(allowed) {
        return Ok(());
    }
    Err(with_message(
        "invalid_username",
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
    ))
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// Body of a comment create/edit form (`text=...`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct CommentSubmission {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

/// Comment text that passed every rule; stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidComment {
    pub text: String,
}

/// Required-field check followed by the content moderator.
pub fn validate_comment(submission: CommentSubmission) -> Result<ValidComment, FieldErrors> {
    let mut errors = derived_errors(&submission);
    if !errors.has("text") {
        if let Err(rejected) = moderation::validate_text(&submission.text) {
            errors.add("text", rejected.message());
        }
    }
    errors.into_result(ValidComment {
        text: submission.text,
    })
}

// ---------------------------------------------------------------------------
// Note
// ---------------------------------------------------------------------------

/// Body of a note create/edit form (`title=...&text=...&slug=...`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct NoteSubmission {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub text: String,

    #[serde(default)]
    #[validate(
        length(max = 100, message = "Ensure this value has at most 100 characters."),
        custom(function = "slug_chars")
    )]
    pub slug: Option<String>,
}

/// A note submission that passed its field rules. The slug still has to go
/// through [`crate::slug`] resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    /// `None` when the submitter left the slug empty.
    pub slug: Option<String>,
}

pub fn validate_note(submission: NoteSubmission) -> Result<NoteDraft, FieldErrors> {
    let errors = derived_errors(&submission);
    let slug = submission
        .slug
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    errors.into_result(NoteDraft {
        title: submission.title,
        text: submission.text,
        slug,
    })
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Body of the login form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginSubmission {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

pub fn validate_login(submission: LoginSubmission) -> Result<LoginSubmission, FieldErrors> {
    derived_errors(&submission).into_result(submission)
}

/// Body of the signup form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupSubmission {
    #[serde(default)]
    #[validate(
        length(max = 150, message = "Ensure this value has at most 150 characters."),
        custom(function = "username_rules")
    )]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub password1: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub password2: String,
}

/// Message attached to `password2` when the two passwords differ.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";

/// A signup request that passed its field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

pub fn validate_signup(submission: SignupSubmission) -> Result<NewAccount, FieldErrors> {
    let mut errors = derived_errors(&submission);
    if !errors.has("password1")
        && !errors.has("password2")
        && submission.password1 != submission.password2
    {
        errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
    }
    errors.into_result(NewAccount {
        username: submission.username.trim().to_string(),
        password: submission.password1,
    })
}
