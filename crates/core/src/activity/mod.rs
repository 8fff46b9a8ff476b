//! Recent activity feed.
//!
//! Events are produced by business operations elsewhere in the system; the
//! dashboard only reads a bounded, newest-first view of them.

pub mod service;
pub mod types;

pub use service::ActivityFeed;
pub use types::{ActivityEvent, ActivityFeedPage, ActivityKind};
