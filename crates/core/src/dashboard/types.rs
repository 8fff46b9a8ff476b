//! Dashboard view types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DashboardError;
use crate::activity::ActivityFeedPage;
use crate::chart::{ChartPoint, ChartSeriesBuilder};
use crate::metrics::PeriodStats;
use crate::notifications::Notification;
use crate::period::ReportingPeriod;
use crate::tutorial::TutorialSnapshot;

/// Load state of one panel slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Fetch in flight.
    #[default]
    Loading,
    /// Data is current.
    Ready,
    /// Fetch failed; zeroed fallback shown.
    Unavailable,
}

impl LoadState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Statistics and chart for one reporting period, always from the same request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPanel {
    /// Selected period.
    pub period: ReportingPeriod,
    /// Reference time the panel was computed for.
    pub reference: DateTime<Utc>,
    /// Headline statistics.
    pub stats: PeriodStats,
    /// State of `stats`.
    pub stats_state: LoadState,
    /// Chart series.
    pub chart: Vec<ChartPoint>,
    /// State of `chart`.
    pub chart_state: LoadState,
}

impl PeriodPanel {
    /// Zeroed panel shown while the fetch is in flight.
    #[must_use]
    pub fn loading(period: ReportingPeriod, reference: DateTime<Utc>) -> Self {
        Self {
            period,
            reference,
            stats: PeriodStats::default(),
            stats_state: LoadState::Loading,
            chart: ChartSeriesBuilder::zero_series(period, reference),
            chart_state: LoadState::Loading,
        }
    }

    /// Builds a panel from fetch results, degrading failures to zeroed values.
    #[must_use]
    pub fn from_results(
        period: ReportingPeriod,
        reference: DateTime<Utc>,
        stats: Result<PeriodStats, DashboardError>,
        chart: Result<Vec<ChartPoint>, DashboardError>,
    ) -> Self {
        let (stats, stats_state) = match stats {
            Ok(stats) => (stats, LoadState::Ready),
            Err(_) => (PeriodStats::default(), LoadState::Unavailable),
        };
        let (chart, chart_state) = match chart {
            Ok(chart) => (chart, LoadState::Ready),
            Err(_) => (
                ChartSeriesBuilder::zero_series(period, reference),
                LoadState::Unavailable,
            ),
        };
        Self {
            period,
            reference,
            stats,
            stats_state,
            chart,
            chart_state,
        }
    }

    /// Whether both slots hold current data.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.stats_state == LoadState::Ready && self.chart_state == LoadState::Ready
    }
}

/// Transient modal visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    /// Support ticket modal.
    pub support: bool,
    /// Notification popover.
    pub notifications: bool,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Period-scoped statistics and chart.
    pub panel: PeriodPanel,
    /// Recent activity.
    pub activity: ActivityFeedPage,
    /// Notifications, most recent first.
    pub notifications: Vec<Notification>,
    /// Unread notifications.
    pub unread_count: usize,
    /// Onboarding progress.
    pub tutorial: TutorialSnapshot,
    /// Modal visibility.
    pub modals: ModalState,
}

impl DashboardView {
    /// Initial view before anything is fetched.
    #[must_use]
    pub fn initial(reference: DateTime<Utc>, tutorial: TutorialSnapshot) -> Self {
        Self {
            panel: PeriodPanel::loading(ReportingPeriod::default(), reference),
            activity: ActivityFeedPage::default(),
            notifications: Vec::new(),
            unread_count: 0,
            tutorial,
            modals: ModalState::default(),
        }
    }
}

/// Result of a period refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The panel was installed in the view.
    Applied(PeriodPanel),
    /// A newer selection superseded this one; its results were dropped.
    Stale,
}

impl RefreshOutcome {
    /// The installed panel, if any.
    #[must_use]
    pub fn panel(&self) -> Option<&PeriodPanel> {
        match self {
            Self::Applied(panel) => Some(panel),
            Self::Stale => None,
        }
    }
}
