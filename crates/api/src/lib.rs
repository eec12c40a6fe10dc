//! HTTP layer for the news and notes applications.
//!
//! Exposes config, state, error handling, auth and routes so integration
//! tests and the two binaries build the exact same router.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
