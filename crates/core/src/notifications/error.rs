//! Notification error types.

use rodabem_shared::AppError;
use rodabem_shared::types::NotificationId;
use thiserror::Error;

/// Errors from notification operations.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// No notification with this id.
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),

    /// The data source could not be reached.
    #[error("Notifications unavailable: {0}")]
    DataUnavailable(String),
}

impl From<NotificationError> for AppError {
    fn from(e: NotificationError) -> Self {
        match e {
            NotificationError::NotFound(_) => Self::NotFound(e.to_string()),
            NotificationError::DataUnavailable(_) => Self::DataUnavailable(e.to_string()),
        }
    }
}
