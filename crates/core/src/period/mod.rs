//! Reporting periods, aggregation windows and chart buckets.
//!
//! Every window is a half-open `[start, end)` interval in UTC aligned to
//! calendar units, so a timestamp belongs to exactly one window of a given
//! granularity.

pub mod buckets;
pub mod types;

#[cfg(test)]
mod props;

pub use buckets::{Bucket, Buckets};
pub use types::{ReportingPeriod, TimeWindow};
