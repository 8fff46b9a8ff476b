//! Data collaborator contract.
//!
//! The dashboard never owns business records. Clients, destinations,
//! bookings, activity events and notifications are served by a backend
//! behind [`DashboardSource`]; the transport is up to the implementation.

pub mod error;
pub mod memory;
pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rodabem_shared::types::NotificationId;

use crate::activity::ActivityEvent;
use crate::notifications::Notification;
use crate::period::TimeWindow;

pub use error::SourceError;
pub use memory::InMemorySource;
pub use types::{BookingRecord, BookingStatus, ClientRecord, DestinationRecord};

/// Read queries and the single idempotent write the dashboard needs.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Clients registered strictly before `end`.
    async fn clients_registered_before(
        &self,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClientRecord>, SourceError>;

    /// All destinations, active or not.
    async fn destinations(&self) -> Result<Vec<DestinationRecord>, SourceError>;

    /// Bookings whose booking time falls within `window`.
    async fn bookings_between(&self, window: TimeWindow)
    -> Result<Vec<BookingRecord>, SourceError>;

    /// Up to `limit` of the most recent activity events, in any order.
    async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEvent>, SourceError>;

    /// Notifications of the current user, in any order.
    async fn notifications(&self) -> Result<Vec<Notification>, SourceError>;

    /// Marks a notification as read. Returns `false` if the id is unknown.
    ///
    /// Must be idempotent: marking a read notification again succeeds.
    async fn mark_notification_read(&self, id: NotificationId) -> Result<bool, SourceError>;
}
