//! Policy layer shared by the news and notes applications.
//!
//! Everything here is pure: no I/O, no async. Handlers in `ya-api` pass an
//! explicit [`identity::RequestContext`] into these functions instead of
//! relying on ambient session state.

pub mod error;
pub mod forms;
pub mod identity;
pub mod moderation;
pub mod ownership;
pub mod slug;
pub mod types;
pub mod visibility;
