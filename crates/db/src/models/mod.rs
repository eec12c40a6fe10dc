//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - For mutable records, an update DTO

pub mod comment;
pub mod news;
pub mod note;
pub mod user;
