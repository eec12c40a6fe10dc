//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`session`] -- carrying the token in a cookie or `Authorization` header.

pub mod jwt;
pub mod password;
pub mod session;

/// Login page shared by both applications.
pub const LOGIN_URL: &str = "/auth/login/";

/// Where a successful login lands when no `next` was supplied.
pub const LOGIN_REDIRECT_URL: &str = "/";

/// The login URL carrying `next`, encoded the way browsers expect it back
/// (slashes stay literal).
pub fn login_redirect_url(next: &str) -> String {
    let next = urlencoding::encode(next).replace("%2F", "/");
    format!("{LOGIN_URL}?next={next}")
}

/// `next` if it is a same-site path, otherwise [`LOGIN_REDIRECT_URL`].
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => LOGIN_REDIRECT_URL,
    }
}
