//! Route trees for both sites.
//!
//! ```text
//! /health                      GET          (both)
//! /auth/login/                 GET, POST    (both)
//! /auth/logout/                GET, POST    (both)
//! /auth/signup/                GET, POST    (both)
//!
//! news:
//! /                            GET
//! /news/{id}/                  GET, POST
//! /edit_comment/{id}/          GET, POST
//! /delete_comment/{id}/        GET, POST, DELETE
//!
//! notes:
//! /                            GET
//! /notes/                      GET
//! /add/                        GET, POST
//! /done/                       GET
//! /note/{slug}/                GET
//! /edit/{slug}/                GET, POST
//! /delete/{slug}/              GET, POST, DELETE
//! ```

pub mod health;
pub mod news;
pub mod notes;
pub mod users;
