//! Page handlers, one module per application plus the shared account pages.

pub mod news;
pub mod notes;
pub mod users;
