//! Time-bucketed chart series.
//!
//! A series always has exactly [`crate::period::ReportingPeriod::bucket_count`]
//! points regardless of how sparse the data is; empty buckets carry zero.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::ChartSeriesBuilder;
pub use types::{ChartPoint, SeriesMetric};
