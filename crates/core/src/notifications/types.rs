//! Notification types.

use chrono::{DateTime, Utc};
use rodabem_shared::types::NotificationId;
use serde::{Deserialize, Serialize};

/// A notification shown in the dashboard's bell popover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the user has opened it.
    pub read: bool,
    /// When it was created.
    pub created_at: DateTime<Utc>,
}

/// Successful result of marking a notification as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkOutcome {
    /// The notification was unread and is now read.
    Marked,
    /// The notification was already read; nothing changed.
    AlreadyRead,
}
