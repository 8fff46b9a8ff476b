//! Notification read/unread state.
//!
//! The store is the only shared mutable resource of the dashboard. Every
//! mutation goes through [`NotificationStore::mark_as_read`], which is
//! serialised and idempotent.

pub mod error;
pub mod store;
pub mod types;

#[cfg(test)]
mod props;

pub use error::NotificationError;
pub use store::NotificationStore;
pub use types::{MarkOutcome, Notification};
