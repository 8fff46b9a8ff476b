//! Metrics types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline statistics for one reporting period.
///
/// `Default` is the zeroed fallback rendered while data is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Clients registered by the end of the period.
    pub total_clients: u64,
    /// Destinations offered during the period.
    pub active_destinations: u64,
    /// Confirmed booking revenue within the period.
    pub monthly_revenue: Decimal,
}
