//! Property-based tests for notification read state.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rodabem_shared::types::NotificationId;

use super::store::NotificationStore;
use super::types::Notification;
use crate::retry::RetryPolicy;
use crate::source::InMemorySource;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn seed(flags: &[bool]) -> Vec<Notification> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &read)| Notification {
            id: NotificationId::new(),
            title: format!("n{i}"),
            message: String::new(),
            read,
            created_at: Utc.timestamp_opt(1_700_000_000 + i64::try_from(i).unwrap(), 0).unwrap(),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Unread count always equals the number of unread entries in the list,
    /// and marking the same ids again leaves the state unchanged.
    #[test]
    fn prop_unread_count_consistent_and_idempotent(
        flags in prop::collection::vec(any::<bool>(), 0..20),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..30),
    ) {
        let notifications = seed(&flags);
        let ids: Vec<_> = notifications.iter().map(|n| n.id).collect();
        let source = Arc::new(InMemorySource::new().with_notifications(notifications));
        let store = NotificationStore::new(source, RetryPolicy::no_retry(Duration::from_secs(1)));

        let (once, twice, expected_unread) = block_on(async {
            store.load().await.unwrap();
            let mut marked = HashSet::new();
            if !ids.is_empty() {
                for pick in &picks {
                    let id = ids[pick.index(ids.len())];
                    store.mark_as_read(id).await.unwrap();
                    marked.insert(id);
                }
            }
            let once = store.list().await;
            for id in &marked {
                store.mark_as_read(*id).await.unwrap();
            }
            let twice = store.list().await;

            let unread_in_list = twice.iter().filter(|n| !n.read).count();
            assert_eq!(store.unread_count().await, unread_in_list);
            let expected = flags
                .iter()
                .zip(&ids)
                .filter(|(read, id)| !**read && !marked.contains(*id))
                .count();
            (once, twice, expected)
        });

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(twice.iter().filter(|n| !n.read).count(), expected_unread);
    }
}
