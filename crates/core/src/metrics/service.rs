//! Metrics aggregation service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::PeriodStats;
use crate::dashboard::DashboardError;
use crate::period::{ReportingPeriod, TimeWindow};
use crate::retry::RetryPolicy;
use crate::source::{BookingRecord, ClientRecord, DashboardSource, DestinationRecord};

/// Computes [`PeriodStats`] from the data source.
#[derive(Clone)]
pub struct MetricsAggregator {
    source: Arc<dyn DashboardSource>,
    retry: RetryPolicy,
}

impl MetricsAggregator {
    /// Creates an aggregator over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn DashboardSource>, retry: RetryPolicy) -> Self {
        Self { source, retry }
    }

    /// Computes statistics for the `period` window containing `reference`.
    ///
    /// The three source queries run concurrently.
    pub async fn compute_stats(
        &self,
        period: ReportingPeriod,
        reference: DateTime<Utc>,
    ) -> Result<PeriodStats, DashboardError> {
        let window = period.window(reference);

        let (clients, destinations, bookings) = tokio::try_join!(
            self.retry.run("clients_registered_before", || {
                self.source.clients_registered_before(window.end)
            }),
            self.retry.run("destinations", || self.source.destinations()),
            self.retry.run("bookings_between", || self.source.bookings_between(window)),
        )
        .map_err(|e| {
            warn!(%period, error = %e, "Failed to compute period stats");
            DashboardError::from(e)
        })?;

        let stats = Self::aggregate(&clients, &destinations, &bookings, &window);
        debug!(
            %period,
            total_clients = stats.total_clients,
            active_destinations = stats.active_destinations,
            revenue = %stats.monthly_revenue,
            "Period stats computed"
        );
        Ok(stats)
    }

    /// Aggregates raw records over `window`.
    ///
    /// Records outside the window are ignored, so callers may pass supersets.
    #[must_use]
    pub fn aggregate(
        clients: &[ClientRecord],
        destinations: &[DestinationRecord],
        bookings: &[BookingRecord],
        window: &TimeWindow,
    ) -> PeriodStats {
        let total_clients = clients
            .iter()
            .filter(|c| c.registered_at < window.end)
            .count();

        let active_destinations = destinations
            .iter()
            .filter(|d| d.is_active && window.overlaps(d.available_from, d.available_until))
            .count();

        let monthly_revenue: Decimal = bookings
            .iter()
            .filter(|b| window.contains(b.booked_at))
            .map(BookingRecord::revenue)
            .sum();

        PeriodStats {
            total_clients: total_clients as u64,
            active_destinations: active_destinations as u64,
            monthly_revenue,
        }
    }
}
