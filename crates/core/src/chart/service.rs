//! Chart series builder.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use super::types::{ChartPoint, SeriesMetric};
use crate::dashboard::DashboardError;
use crate::period::{Buckets, ReportingPeriod};
use crate::retry::RetryPolicy;
use crate::source::{BookingRecord, DashboardSource};

/// Builds fixed-length chart series from the data source.
#[derive(Clone)]
pub struct ChartSeriesBuilder {
    source: Arc<dyn DashboardSource>,
    retry: RetryPolicy,
}

impl ChartSeriesBuilder {
    /// Creates a builder over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn DashboardSource>, retry: RetryPolicy) -> Self {
        Self { source, retry }
    }

    /// New clients per bucket for `period`, ending with the bucket containing `reference`.
    pub async fn build_series(
        &self,
        period: ReportingPeriod,
        reference: DateTime<Utc>,
    ) -> Result<Vec<ChartPoint>, DashboardError> {
        self.build(SeriesMetric::NewClients, period, reference).await
    }

    /// Confirmed revenue per bucket for `period`.
    pub async fn build_revenue_series(
        &self,
        period: ReportingPeriod,
        reference: DateTime<Utc>,
    ) -> Result<Vec<ChartPoint>, DashboardError> {
        self.build(SeriesMetric::Revenue, period, reference).await
    }

    /// Builds the series for `metric`.
    pub async fn build(
        &self,
        metric: SeriesMetric,
        period: ReportingPeriod,
        reference: DateTime<Utc>,
    ) -> Result<Vec<ChartPoint>, DashboardError> {
        let span = period.series_window(reference);
        let buckets = period.buckets(reference);

        let samples: Vec<(DateTime<Utc>, Decimal)> = match metric {
            SeriesMetric::NewClients => self
                .retry
                .run("clients_registered_before", || {
                    self.source.clients_registered_before(span.end)
                })
                .await
                .map(|clients| {
                    clients
                        .into_iter()
                        .map(|c| (c.registered_at, Decimal::ONE))
                        .collect()
                }),
            SeriesMetric::Revenue => self
                .retry
                .run("bookings_between", || self.source.bookings_between(span))
                .await
                .map(|bookings| {
                    bookings
                        .iter()
                        .map(|b| (b.booked_at, BookingRecord::revenue(b)))
                        .collect()
                }),
        }
        .map_err(|e| {
            warn!(%period, ?metric, error = %e, "Failed to build chart series");
            DashboardError::from(e)
        })?;

        Ok(Self::bucketize(buckets, &samples))
    }

    /// Sums samples into buckets. Samples outside every bucket are dropped.
    #[must_use]
    pub fn bucketize(buckets: Buckets, samples: &[(DateTime<Utc>, Decimal)]) -> Vec<ChartPoint> {
        buckets
            .map(|bucket| {
                let value = samples
                    .iter()
                    .filter(|(at, _)| bucket.window.contains(*at))
                    .map(|(_, v)| *v)
                    .sum();
                ChartPoint {
                    bucket_label: bucket.label,
                    bucket_start: bucket.window.start,
                    value,
                }
            })
            .collect()
    }

    /// Series of the right shape with every value zero.
    ///
    /// Rendered in place of a series that could not be fetched.
    #[must_use]
    pub fn zero_series(period: ReportingPeriod, reference: DateTime<Utc>) -> Vec<ChartPoint> {
        Self::bucketize(period.buckets(reference), &[])
    }
}
