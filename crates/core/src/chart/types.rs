//! Chart types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bucket of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Bucket label, unique within the series.
    pub bucket_label: String,
    /// Start of the bucket.
    pub bucket_start: DateTime<Utc>,
    /// Aggregated value; zero for an empty bucket.
    pub value: Decimal,
}

/// What a series measures per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMetric {
    /// Clients registered in the bucket.
    #[default]
    NewClients,
    /// Confirmed booking revenue in the bucket.
    Revenue,
}
