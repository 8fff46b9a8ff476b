//! Notification store.

use std::collections::HashMap;
use std::sync::Arc;

use rodabem_shared::types::NotificationId;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use super::error::NotificationError;
use super::types::{MarkOutcome, Notification};
use crate::retry::RetryPolicy;
use crate::source::DashboardSource;

/// Holds the user's notifications, most recent first.
///
/// The unread count is always derived from the held list and published on a
/// watch channel after every change. A read flag only ever goes from unread
/// to read: reloads and pushes never downgrade it.
pub struct NotificationStore {
    source: Arc<dyn DashboardSource>,
    retry: RetryPolicy,
    notifications: Mutex<Vec<Notification>>,
    in_flight: Mutex<HashMap<NotificationId, Arc<Mutex<()>>>>,
    unread: watch::Sender<usize>,
}

impl NotificationStore {
    /// Creates an empty store. Call [`Self::load`] to fetch from the source.
    #[must_use]
    pub fn new(source: Arc<dyn DashboardSource>, retry: RetryPolicy) -> Self {
        let (unread, _) = watch::channel(0);
        Self {
            source,
            retry,
            notifications: Mutex::new(Vec::new()),
            in_flight: Mutex::new(HashMap::new()),
            unread,
        }
    }

    /// Replaces the held list with the source's current notifications.
    ///
    /// Notifications already read locally stay read even if the fetched copy
    /// predates the write. On failure the previous list is kept.
    pub async fn load(&self) -> Result<usize, NotificationError> {
        let mut fetched = self
            .retry
            .run("notifications", || self.source.notifications())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to load notifications");
                NotificationError::DataUnavailable(e.to_string())
            })?;
        sort_most_recent_first(&mut fetched);

        let mut held = self.notifications.lock().await;
        for notification in &mut fetched {
            if held.iter().any(|n| n.id == notification.id && n.read) {
                notification.read = true;
            }
        }
        *held = fetched;
        self.publish(&held);
        debug!(count = held.len(), "Notifications loaded");
        Ok(held.len())
    }

    /// Adds a notification pushed by the backend, keeping the order.
    ///
    /// A notification whose id is already held replaces the held copy, except
    /// that a held read flag is kept.
    pub async fn push(&self, mut notification: Notification) {
        let mut held = self.notifications.lock().await;
        if held.iter().any(|n| n.id == notification.id && n.read) {
            notification.read = true;
        }
        held.retain(|n| n.id != notification.id);
        held.push(notification);
        sort_most_recent_first(&mut held);
        self.publish(&held);
    }

    /// All notifications, most recent first.
    pub async fn list(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }

    /// Number of notifications whose read flag is false.
    pub async fn unread_count(&self) -> usize {
        count_unread(&self.notifications.lock().await)
    }

    /// Receives the unread count after every change.
    #[must_use]
    pub fn subscribe_unread(&self) -> watch::Receiver<usize> {
        self.unread.subscribe()
    }

    /// Marks one notification as read.
    ///
    /// Idempotent: an already-read notification reports
    /// [`MarkOutcome::AlreadyRead`]. Calls for the same id are serialised, so
    /// concurrent calls write to the source at most once. The list stays
    /// readable while the write is in flight. If the write fails the flag
    /// stays unchanged.
    pub async fn mark_as_read(&self, id: NotificationId) -> Result<MarkOutcome, NotificationError> {
        let gate = Arc::clone(self.in_flight.lock().await.entry(id).or_default());
        let result = {
            let _serialised = gate.lock().await;
            self.mark_serialised(id).await
        };
        self.release_gate(id, &gate).await;
        result
    }

    async fn mark_serialised(&self, id: NotificationId) -> Result<MarkOutcome, NotificationError> {
        {
            let held = self.notifications.lock().await;
            let Some(notification) = held.iter().find(|n| n.id == id) else {
                return Err(NotificationError::NotFound(id));
            };
            if notification.read {
                debug!(notification_id = %id, "Notification already read");
                return Ok(MarkOutcome::AlreadyRead);
            }
        }

        let found = self
            .retry
            .run("mark_notification_read", || {
                self.source.mark_notification_read(id)
            })
            .await
            .map_err(|e| {
                warn!(notification_id = %id, error = %e, "Failed to mark notification as read");
                NotificationError::DataUnavailable(e.to_string())
            })?;
        if !found {
            return Err(NotificationError::NotFound(id));
        }

        // A reload during the write may have replaced the list.
        let mut held = self.notifications.lock().await;
        if let Some(notification) = held.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
        self.publish(&held);
        info!(notification_id = %id, "Notification marked as read");
        Ok(MarkOutcome::Marked)
    }

    async fn release_gate(&self, id: NotificationId, gate: &Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;
        // The map and this call hold the only references: nobody is waiting.
        if Arc::strong_count(gate) == 2 {
            in_flight.remove(&id);
        }
    }

    fn publish(&self, held: &[Notification]) {
        self.unread.send_replace(count_unread(held));
    }
}

fn count_unread(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

fn sort_most_recent_first(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
    }

    fn notification(minutes: i64, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(),
            title: format!("Aviso {minutes}"),
            message: "Plano expira em breve".into(),
            read,
            created_at: base() + Duration::minutes(minutes),
        }
    }

    fn store(source: Arc<InMemorySource>) -> NotificationStore {
        NotificationStore::new(source, RetryPolicy::no_retry(std::time::Duration::from_secs(1)))
    }

    #[tokio::test]
    async fn test_seeded_unread_then_mark() {
        let first = notification(1, false);
        let second = notification(2, true);
        let first_id = first.id;
        let source = Arc::new(InMemorySource::new().with_notifications([first, second]));
        let store = store(source);
        store.load().await.unwrap();

        assert_eq!(store.unread_count().await, 1);
        assert_eq!(store.mark_as_read(first_id).await.unwrap(), MarkOutcome::Marked);
        assert_eq!(store.unread_count().await, 0);
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first_and_stable_on_read() {
        let old = notification(1, false);
        let new = notification(5, false);
        let old_id = old.id;
        let source = Arc::new(InMemorySource::new().with_notifications([old, new]));
        let store = store(source);
        store.load().await.unwrap();

        let before: Vec<_> = store.list().await.iter().map(|n| n.id).collect();
        store.mark_as_read(old_id).await.unwrap();
        let after: Vec<_> = store.list().await.iter().map(|n| n.id).collect();

        assert_eq!(before, after);
        assert_eq!(after[1], old_id);
    }

    #[tokio::test]
    async fn test_mark_twice_is_idempotent() {
        let n = notification(1, false);
        let id = n.id;
        let source = Arc::new(InMemorySource::new().with_notifications([n]));
        let store = store(Arc::clone(&source));
        store.load().await.unwrap();

        assert_eq!(store.mark_as_read(id).await.unwrap(), MarkOutcome::Marked);
        assert_eq!(store.mark_as_read(id).await.unwrap(), MarkOutcome::AlreadyRead);
        assert_eq!(store.unread_count().await, 0);
        assert_eq!(source.mark_read_writes(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_marks_write_once() {
        let n = notification(1, false);
        let id = n.id;
        let source = Arc::new(
            InMemorySource::new()
                .with_notifications([n, notification(2, false)])
                .with_latency(std::time::Duration::from_millis(5)),
        );
        let store = Arc::new(store(Arc::clone(&source)));
        store.load().await.unwrap();

        let (a, b) = tokio::join!(store.mark_as_read(id), store.mark_as_read(id));

        let mut outcomes = [a.unwrap(), b.unwrap()];
        outcomes.sort_by_key(|o| matches!(o, MarkOutcome::AlreadyRead));
        assert_eq!(outcomes, [MarkOutcome::Marked, MarkOutcome::AlreadyRead]);
        assert_eq!(store.unread_count().await, 1);
        assert_eq!(source.mark_read_writes(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_and_changes_nothing() {
        let source = Arc::new(InMemorySource::new().with_notifications([notification(1, false)]));
        let store = store(source);
        store.load().await.unwrap();

        let result = store.mark_as_read(NotificationId::new()).await;

        assert!(matches!(result, Err(NotificationError::NotFound(_))));
        assert_eq!(store.unread_count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_flag() {
        let n = notification(1, false);
        let id = n.id;
        let source = Arc::new(InMemorySource::new().with_notifications([n]));
        let store = store(Arc::clone(&source));
        store.load().await.unwrap();
        source.set_available(false);

        let result = store.mark_as_read(id).await;

        assert!(matches!(result, Err(NotificationError::DataUnavailable(_))));
        assert_eq!(store.unread_count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let source = Arc::new(InMemorySource::new().with_notifications([notification(1, false)]));
        let store = store(Arc::clone(&source));
        store.load().await.unwrap();
        source.set_available(false);

        assert!(store.load().await.is_err());
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_unread_changes() {
        let n = notification(1, false);
        let id = n.id;
        let source = Arc::new(InMemorySource::new().with_notifications([n]));
        let store = store(source);
        let mut unread = store.subscribe_unread();

        store.load().await.unwrap();
        assert_eq!(*unread.borrow_and_update(), 1);

        store.push(notification(9, false)).await;
        assert!(unread.has_changed().unwrap());
        assert_eq!(*unread.borrow_and_update(), 2);

        store.mark_as_read(id).await.unwrap();
        assert_eq!(*unread.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn test_push_replaces_same_id() {
        let store = store(Arc::new(InMemorySource::new()));
        let mut n = notification(1, false);
        store.push(n.clone()).await;
        n.title = "Aviso atualizado".into();
        n.read = true;
        store.push(n).await;

        let list = store.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Aviso atualizado");
        assert_eq!(store.unread_count().await, 0);
    }

    #[tokio::test]
    async fn test_late_push_keeps_read_flag() {
        let n = notification(1, false);
        let id = n.id;
        let source = Arc::new(InMemorySource::new().with_notifications([n.clone()]));
        let store = store(source);
        store.load().await.unwrap();
        store.mark_as_read(id).await.unwrap();

        store.push(n).await;

        assert_eq!(store.list().await.len(), 1);
        assert_eq!(store.unread_count().await, 0);
    }

    #[tokio::test]
    async fn test_reload_never_downgrades_read_flag() {
        let source = Arc::new(InMemorySource::new());
        let store = store(Arc::clone(&source));
        let mut n = notification(1, true);
        store.push(n.clone()).await;
        n.read = false;
        source.add_notification(n).await;

        assert_eq!(store.load().await.unwrap(), 1);

        assert_eq!(store.unread_count().await, 0);
        assert!(store.list().await[0].read);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_racing_mark_keeps_mark() {
        let n = notification(1, false);
        let id = n.id;
        let source = Arc::new(
            InMemorySource::new()
                .with_notifications([n])
                .with_latency(std::time::Duration::from_millis(10)),
        );
        let store = store(Arc::clone(&source));
        store.load().await.unwrap();

        let (loaded, marked) = tokio::join!(store.load(), async {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            store.mark_as_read(id).await
        });

        assert_eq!(loaded.unwrap(), 1);
        assert_eq!(marked.unwrap(), MarkOutcome::Marked);
        assert_eq!(store.unread_count().await, 0);
        assert_eq!(*store.subscribe_unread().borrow(), 0);
        assert_eq!(source.mark_read_writes(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_readers_not_blocked_by_pending_write() {
        let n = notification(1, false);
        let id = n.id;
        let source = Arc::new(
            InMemorySource::new()
                .with_notifications([n])
                .with_latency(std::time::Duration::from_millis(500)),
        );
        let store = Arc::new(store(source));
        store.load().await.unwrap();

        let marking = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.mark_as_read(id).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let list = tokio::time::timeout(std::time::Duration::from_millis(1), store.list()).await;
        assert_eq!(list.unwrap().len(), 1);
        let unread =
            tokio::time::timeout(std::time::Duration::from_millis(1), store.unread_count()).await;
        assert_eq!(unread.unwrap(), 1);

        assert_eq!(marking.await.unwrap().unwrap(), MarkOutcome::Marked);
        assert_eq!(store.unread_count().await, 0);
    }
}
