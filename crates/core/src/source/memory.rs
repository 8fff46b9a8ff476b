//! In-memory data source.
//!
//! Backs the demo server and the test suites. An availability switch and an
//! optional per-call latency let callers exercise degraded and slow paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rodabem_shared::types::NotificationId;
use tokio::sync::RwLock;

use super::error::SourceError;
use super::types::{BookingRecord, ClientRecord, DestinationRecord};
use super::DashboardSource;
use crate::activity::ActivityEvent;
use crate::notifications::Notification;
use crate::period::TimeWindow;

#[derive(Debug, Default)]
struct Records {
    clients: Vec<ClientRecord>,
    destinations: Vec<DestinationRecord>,
    bookings: Vec<BookingRecord>,
    activity: Vec<ActivityEvent>,
    notifications: Vec<Notification>,
}

/// Data source holding every record in memory.
#[derive(Debug)]
pub struct InMemorySource {
    records: RwLock<Records>,
    available: AtomicBool,
    latency: Option<Duration>,
    mark_read_writes: AtomicUsize,
}

impl InMemorySource {
    /// Creates an empty, available source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records::default()),
            available: AtomicBool::new(true),
            latency: None,
            mark_read_writes: AtomicUsize::new(0),
        }
    }

    /// Delays every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seeds clients.
    #[must_use]
    pub fn with_clients(mut self, clients: impl IntoIterator<Item = ClientRecord>) -> Self {
        self.records.get_mut().clients.extend(clients);
        self
    }

    /// Seeds destinations.
    #[must_use]
    pub fn with_destinations(
        mut self,
        destinations: impl IntoIterator<Item = DestinationRecord>,
    ) -> Self {
        self.records.get_mut().destinations.extend(destinations);
        self
    }

    /// Seeds bookings.
    #[must_use]
    pub fn with_bookings(mut self, bookings: impl IntoIterator<Item = BookingRecord>) -> Self {
        self.records.get_mut().bookings.extend(bookings);
        self
    }

    /// Seeds activity events.
    #[must_use]
    pub fn with_activity(mut self, events: impl IntoIterator<Item = ActivityEvent>) -> Self {
        self.records.get_mut().activity.extend(events);
        self
    }

    /// Seeds notifications.
    #[must_use]
    pub fn with_notifications(
        mut self,
        notifications: impl IntoIterator<Item = Notification>,
    ) -> Self {
        self.records.get_mut().notifications.extend(notifications);
        self
    }

    /// Toggles availability. While unavailable every call fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Appends an activity event, as a business operation would.
    pub async fn record_activity(&self, event: ActivityEvent) {
        self.records.write().await.activity.push(event);
    }

    /// Adds a notification, as the backend would when something happens.
    pub async fn add_notification(&self, notification: Notification) {
        self.records.write().await.notifications.push(notification);
    }

    /// Number of mark-as-read writes that flipped a flag.
    #[must_use]
    pub fn mark_read_writes(&self) -> usize {
        self.mark_read_writes.load(Ordering::SeqCst)
    }

    async fn ready(&self) -> Result<(), SourceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SourceError::Unavailable("in-memory source switched off".into()))
        }
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardSource for InMemorySource {
    async fn clients_registered_before(
        &self,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClientRecord>, SourceError> {
        self.ready().await?;
        let records = self.records.read().await;
        Ok(records
            .clients
            .iter()
            .filter(|c| c.registered_at < end)
            .cloned()
            .collect())
    }

    async fn destinations(&self) -> Result<Vec<DestinationRecord>, SourceError> {
        self.ready().await?;
        Ok(self.records.read().await.destinations.clone())
    }

    async fn bookings_between(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<BookingRecord>, SourceError> {
        self.ready().await?;
        let records = self.records.read().await;
        Ok(records
            .bookings
            .iter()
            .filter(|b| window.contains(b.booked_at))
            .cloned()
            .collect())
    }

    async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEvent>, SourceError> {
        self.ready().await?;
        let records = self.records.read().await;
        let mut events = records.activity.clone();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(limit);
        Ok(events)
    }

    async fn notifications(&self) -> Result<Vec<Notification>, SourceError> {
        self.ready().await?;
        Ok(self.records.read().await.notifications.clone())
    }

    async fn mark_notification_read(&self, id: NotificationId) -> Result<bool, SourceError> {
        self.ready().await?;
        let mut records = self.records.write().await;
        let Some(notification) = records.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        if !notification.read {
            notification.read = true;
            self.mark_read_writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(true)
    }
}
