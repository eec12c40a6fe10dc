//! Slug generation and collision checks for notes.
//!
//! A slug is resolved in two steps because the collision check needs a
//! storage lookup: [`candidate_slug`] picks the value, then the caller looks
//! up which note (if any) already holds it and passes that id to
//! [`check_available`]. [`resolve_slug`] runs both with a caller-supplied
//! lookup.

use std::future::Future;

use crate::forms::FieldErrors;
use crate::types::DbId;

/// Maximum slug length, matching the `notes.slug` column.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Suffix of the collision message; the offending slug is prepended.
pub const SLUG_TAKEN_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Reported when a title produces no usable slug characters at all.
pub const EMPTY_SLUG_MESSAGE: &str =
    "Could not derive a slug from the title. Please enter one explicitly.";

/// Form field that slug errors are attached to.
pub const SLUG_FIELD: &str = "slug";

/// Collision message naming `slug`.
pub fn slug_taken_message(slug: &str) -> String {
    format!("{slug}{SLUG_TAKEN_WARNING}")
}

/// Latin spelling of a lowercase Cyrillic letter.
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Generate a URL-safe slug from a title.
///
/// Lowercases, transliterates Cyrillic, keeps ASCII alphanumerics and `_`,
/// collapses every other run of characters into one hyphen, trims hyphens
/// from both ends and truncates to [`MAX_SLUG_LENGTH`].
pub fn slugify(title: &str) -> String {
    fn push(slug: &mut String, pending_hyphen: &mut bool, s: &str) {
        if *pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        *pending_hyphen = false;
        slug.push_str(s);
    }

    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            let mut buf = [0u8; 4];
            push(&mut slug, &mut pending_hyphen, c.encode_utf8(&mut buf));
        } else if let Some(latin) = transliterate(c) {
            if !latin.is_empty() {
                push(&mut slug, &mut pending_hyphen, latin);
            }
        } else {
            pending_hyphen = true;
        }
    }

    // Everything pushed is ASCII, so byte truncation is char-safe.
    slug.truncate(MAX_SLUG_LENGTH);
    slug.trim_end_matches('-').to_string()
}

/// The slug a note should get: the explicit value when non-empty, otherwise
/// one derived from the title.
pub fn candidate_slug(title: &str, explicit: Option<&str>) -> String {
    match explicit {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => slugify(title),
    }
}

/// Accept `candidate` unless a note other than `editing` already holds it.
///
/// `holder` is the id of the note currently stored under `candidate`, if
/// any. Keeping one's own slug while editing is not a collision.
pub fn check_available(
    candidate: String,
    holder: Option<DbId>,
    editing: Option<DbId>,
) -> Result<String, FieldErrors> {
    if candidate.is_empty() {
        return Err(FieldErrors::single(SLUG_FIELD, EMPTY_SLUG_MESSAGE));
    }
    match holder {
        Some(holder_id) if Some(holder_id) != editing => Err(FieldErrors::single(
            SLUG_FIELD,
            slug_taken_message(&candidate),
        )),
        _ => Ok(candidate),
    }
}

/// Pick the candidate for `title`/`explicit`, find its current holder via
/// `holder_of` and check it is available to the note `editing`.
///
/// The outer `Result` carries lookup failures; the inner one the form error.
pub async fn resolve_slug<F, Fut, E>(
    title: &str,
    explicit: Option<&str>,
    editing: Option<DbId>,
    holder_of: F,
) -> Result<Result<String, FieldErrors>, E>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<Option<DbId>, E>>,
{
    let candidate = candidate_slug(title, explicit);
    if candidate.is_empty() {
        return Ok(check_available(candidate, None, editing));
    }
    let holder = holder_of(candidate.clone()).await?;
    Ok(check_available(candidate, holder, editing))
}
