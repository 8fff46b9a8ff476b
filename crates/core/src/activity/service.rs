//! Activity feed service.

use std::sync::Arc;

use tracing::warn;

use super::types::{ActivityEvent, ActivityFeedPage};
use crate::retry::RetryPolicy;
use crate::source::DashboardSource;

/// Reads the recent activity feed from the data source.
#[derive(Clone)]
pub struct ActivityFeed {
    source: Arc<dyn DashboardSource>,
    retry: RetryPolicy,
    default_limit: usize,
    max_limit: usize,
}

impl ActivityFeed {
    /// Creates a feed reader.
    ///
    /// `default_limit` applies when no limit is requested; any request is
    /// capped at `max_limit`.
    #[must_use]
    pub fn new(
        source: Arc<dyn DashboardSource>,
        retry: RetryPolicy,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        Self {
            source,
            retry,
            default_limit: default_limit.min(max_limit),
            max_limit,
        }
    }

    /// Effective limit for a request.
    #[must_use]
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }

    /// Returns up to `limit` events, newest first.
    ///
    /// Never fails: an unavailable source yields an empty, degraded page.
    pub async fn recent(&self, limit: Option<usize>) -> ActivityFeedPage {
        let limit = self.effective_limit(limit);
        if limit == 0 {
            return ActivityFeedPage::default();
        }

        match self
            .retry
            .run("recent_activity", || self.source.recent_activity(limit))
            .await
        {
            Ok(events) => ActivityFeedPage {
                events: newest_first(events, limit),
                degraded: false,
            },
            Err(e) => {
                warn!(error = %e, limit, "Activity feed unavailable");
                ActivityFeedPage::degraded()
            }
        }
    }
}

/// Orders events newest first (ties by id) and caps the length.
///
/// Sources are not trusted to order or cap their answer.
#[must_use]
pub fn newest_first(mut events: Vec<ActivityEvent>, limit: usize) -> Vec<ActivityEvent> {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
    events.truncate(limit);
    events
}
