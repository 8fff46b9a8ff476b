//! Dashboard controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rodabem_shared::AppConfig;
use rodabem_shared::types::NotificationId;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::types::{DashboardView, LoadState, ModalState, PeriodPanel, RefreshOutcome};
use crate::activity::{ActivityFeed, ActivityFeedPage};
use crate::chart::{ChartPoint, ChartSeriesBuilder};
use crate::metrics::{MetricsAggregator, PeriodStats};
use crate::notifications::{MarkOutcome, Notification, NotificationError, NotificationStore};
use crate::period::ReportingPeriod;
use crate::retry::RetryPolicy;
use crate::source::DashboardSource;
use crate::tutorial::{ArriveOutcome, TutorialEngine};

/// Orchestrates the dashboard's data components.
///
/// Period selections are last-request-wins: every selection takes a new
/// generation and its panel is installed only if no newer selection started
/// meanwhile. Stats and chart for one selection are installed together.
pub struct DashboardController {
    metrics: MetricsAggregator,
    charts: ChartSeriesBuilder,
    activity: ActivityFeed,
    notifications: NotificationStore,
    tutorial: TutorialEngine,
    generation: AtomicU64,
    view: watch::Sender<DashboardView>,
    live: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardController {
    /// Creates a controller over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn DashboardSource>, config: &AppConfig) -> Self {
        let retry = RetryPolicy::from_config(&config.retry, &config.dashboard);
        let tutorial = TutorialEngine::new(config.dashboard.settle_delay());
        let (view, _) = watch::channel(DashboardView::initial(Utc::now(), tutorial.snapshot()));

        Self {
            metrics: MetricsAggregator::new(Arc::clone(&source), retry.clone()),
            charts: ChartSeriesBuilder::new(Arc::clone(&source), retry.clone()),
            activity: ActivityFeed::new(
                Arc::clone(&source),
                retry.clone(),
                config.dashboard.activity_limit,
                config.dashboard.max_activity_limit,
            ),
            notifications: NotificationStore::new(source, retry),
            tutorial,
            generation: AtomicU64::new(0),
            view,
            live: Mutex::new(None),
        }
    }

    /// Fetches everything for the current period as of now.
    pub async fn load(&self) -> DashboardView {
        self.load_at(Utc::now()).await
    }

    /// Fetches everything for the current period as of `reference`.
    ///
    /// Failures degrade the affected slots; the view is always returned.
    pub async fn load_at(&self, reference: DateTime<Utc>) -> DashboardView {
        let period = self.selected_period();
        let (_, activity, notifications) = tokio::join!(
            self.select_period_at(period, reference),
            self.activity.recent(None),
            self.notifications.load(),
        );
        if let Err(e) = notifications {
            debug!(error = %e, "Keeping previous notifications");
        }

        self.view.send_modify(|view| view.activity = activity);
        self.sync_notifications().await;
        self.view()
    }

    /// Currently selected period.
    #[must_use]
    pub fn selected_period(&self) -> ReportingPeriod {
        self.view.borrow().panel.period
    }

    /// Selects `period` and refreshes the panel as of now.
    pub async fn select_period(&self, period: ReportingPeriod) -> RefreshOutcome {
        self.select_period_at(period, Utc::now()).await
    }

    /// Selects `period` and refreshes the panel as of `reference`.
    ///
    /// Returns [`RefreshOutcome::Stale`] if a newer selection started before
    /// this one resolved; its results are then discarded.
    pub async fn select_period_at(
        &self,
        period: ReportingPeriod,
        reference: DateTime<Utc>,
    ) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(%period, generation, "Reporting period selected");
        self.install(generation, PeriodPanel::loading(period, reference));

        let (stats, chart) = tokio::join!(
            self.metrics.compute_stats(period, reference),
            self.charts.build_series(period, reference),
        );
        let panel = PeriodPanel::from_results(period, reference, stats, chart);

        if self.install(generation, panel.clone()) {
            RefreshOutcome::Applied(panel)
        } else {
            debug!(%period, generation, "Stale period response dropped");
            RefreshOutcome::Stale
        }
    }

    /// Statistics for `period` without touching the view.
    pub async fn stats(
        &self,
        period: ReportingPeriod,
        reference: DateTime<Utc>,
    ) -> (PeriodStats, LoadState) {
        match self.metrics.compute_stats(period, reference).await {
            Ok(stats) => (stats, LoadState::Ready),
            Err(_) => (PeriodStats::default(), LoadState::Unavailable),
        }
    }

    /// Client chart for `period` without touching the view.
    pub async fn chart(
        &self,
        period: ReportingPeriod,
        reference: DateTime<Utc>,
    ) -> (Vec<ChartPoint>, LoadState) {
        match self.charts.build_series(period, reference).await {
            Ok(points) => (points, LoadState::Ready),
            Err(_) => (
                ChartSeriesBuilder::zero_series(period, reference),
                LoadState::Unavailable,
            ),
        }
    }

    /// Recent activity capped at `limit` without touching the view.
    pub async fn activity(&self, limit: Option<usize>) -> ActivityFeedPage {
        self.activity.recent(limit).await
    }

    /// Re-reads the activity feed into the view.
    pub async fn refresh_activity(&self) -> ActivityFeedPage {
        let page = self.activity.recent(None).await;
        self.view.send_modify(|view| view.activity = page.clone());
        page
    }

    /// Notification store backing the bell popover.
    #[must_use]
    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    /// Marks a notification as read and refreshes the view.
    pub async fn mark_notification_read(
        &self,
        id: NotificationId,
    ) -> Result<MarkOutcome, NotificationError> {
        let outcome = self.notifications.mark_as_read(id).await?;
        self.sync_notifications().await;
        Ok(outcome)
    }

    /// Adds a notification pushed by the backend.
    pub async fn push_notification(&self, notification: Notification) {
        self.notifications.push(notification).await;
        self.sync_notifications().await;
    }

    /// Current modal flags.
    #[must_use]
    pub fn modals(&self) -> ModalState {
        self.view.borrow().modals
    }

    /// Updates the given modal flags, leaving the others as they are.
    ///
    /// Opening the notification popover does not mark anything read.
    pub fn update_modals(&self, support: Option<bool>, notifications: Option<bool>) -> ModalState {
        self.view.send_if_modified(|view| {
            let before = view.modals;
            if let Some(open) = support {
                view.modals.support = open;
            }
            if let Some(open) = notifications {
                view.modals.notifications = open;
            }
            view.modals != before
        });
        self.modals()
    }

    /// Opens or closes the support ticket modal.
    pub fn set_support_modal(&self, open: bool) -> ModalState {
        self.update_modals(Some(open), None)
    }

    /// Opens or closes the notification popover.
    pub fn set_notification_popover(&self, open: bool) -> ModalState {
        self.update_modals(None, Some(open))
    }

    /// Onboarding tutorial.
    #[must_use]
    pub fn tutorial(&self) -> &TutorialEngine {
        &self.tutorial
    }

    /// Reports a route change to the tutorial.
    pub async fn navigate(&self, route: &str) -> Option<ArriveOutcome> {
        let outcome = self.tutorial.arrive_route(route).await;
        self.sync_tutorial();
        outcome
    }

    /// Snapshot of everything the dashboard renders.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let mut view = self.view.borrow().clone();
        view.tutorial = self.tutorial.snapshot();
        view
    }

    /// Receives the view after every change.
    ///
    /// Timer-driven tutorial completions and notification changes made
    /// outside the controller only reach subscribers while
    /// [`Self::spawn_live_updates`] is running.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.subscribe()
    }

    /// Starts forwarding unread-count and tutorial changes into the view.
    ///
    /// Replaces a previously started forwarder. The task holds a weak
    /// reference and ends when the controller is dropped.
    pub async fn spawn_live_updates(self: &Arc<Self>) {
        let controller = Arc::downgrade(self);
        let mut unread = self.notifications.subscribe_unread();
        let mut tutorial = self.tutorial.subscribe();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = unread.changed() => {
                        let (Ok(()), Some(controller)) = (changed, controller.upgrade()) else {
                            break;
                        };
                        controller.sync_notifications().await;
                    }
                    changed = tutorial.changed() => {
                        let (Ok(()), Some(controller)) = (changed, controller.upgrade()) else {
                            break;
                        };
                        controller.sync_tutorial();
                    }
                }
            }
            debug!("Live dashboard updates stopped");
        });

        if let Some(previous) = self.live.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Tears the dashboard down: cancels the pending tutorial settle and
    /// stops live updates.
    pub async fn teardown(&self) {
        self.tutorial.teardown().await;
        if let Some(live) = self.live.lock().await.take() {
            live.abort();
        }
        debug!("Dashboard torn down");
    }

    fn install(&self, generation: u64, panel: PeriodPanel) -> bool {
        self.view.send_if_modified(|view| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            view.panel = panel;
            true
        })
    }

    async fn sync_notifications(&self) {
        let notifications = self.notifications.list().await;
        let unread_count = notifications.iter().filter(|n| !n.read).count();
        self.view.send_modify(|view| {
            view.notifications = notifications;
            view.unread_count = unread_count;
        });
    }

    fn sync_tutorial(&self) {
        let snapshot = self.tutorial.snapshot();
        self.view.send_if_modified(|view| {
            if view.tutorial == snapshot {
                return false;
            }
            view.tutorial = snapshot;
            true
        });
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        if let Some(live) = self.live.get_mut().take() {
            live.abort();
        }
    }
}
