//! Headline statistics per reporting period.
//!
//! Statistics are recomputed from the source on every request and never
//! maintained incrementally.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::MetricsAggregator;
pub use types::PeriodStats;
