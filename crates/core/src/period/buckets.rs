//! Lazy, restartable chart bucket sequence.

use chrono::{DateTime, NaiveDate, Utc};

use super::types::{ReportingPeriod, TimeWindow, start_of};

/// One chart bucket: a labelled calendar unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Unique label within a series.
    pub label: String,
    /// Half-open interval covered by the bucket.
    pub window: TimeWindow,
}

/// Iterator over the chart buckets of a period, oldest first.
///
/// Buckets are computed on demand. Cloning the iterator restarts it from the
/// clone point; a fresh [`ReportingPeriod::buckets`] call always yields the
/// full sequence of [`ReportingPeriod::bucket_count`] buckets.
#[derive(Debug, Clone)]
pub struct Buckets {
    period: ReportingPeriod,
    next_start: NaiveDate,
    remaining: usize,
}

impl Buckets {
    /// Creates the bucket sequence ending with the unit containing `reference`.
    #[must_use]
    pub fn new(period: ReportingPeriod, reference: DateTime<Utc>) -> Self {
        let last = period.unit_start(reference.date_naive());
        let span = u32::try_from(period.bucket_count() - 1).unwrap_or(0);
        Self {
            period,
            next_start: period.units_back(last, span),
            remaining: period.bucket_count(),
        }
    }

    /// Period the buckets belong to.
    #[must_use]
    pub const fn period(&self) -> ReportingPeriod {
        self.period
    }
}

impl Iterator for Buckets {
    type Item = Bucket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let start = self.next_start;
        let end = self.period.next_unit(start);
        self.next_start = end;
        self.remaining -= 1;

        Some(Bucket {
            label: self.period.label(start),
            window: TimeWindow::new(start_of(start), start_of(end)),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Buckets {}

impl std::iter::FusedIterator for Buckets {}
