//! Dashboard error types.

use rodabem_shared::AppError;
use thiserror::Error;

use crate::source::SourceError;

/// Errors from dashboard data operations.
#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    /// Upstream fetch failed or timed out.
    #[error("Dashboard data unavailable: {0}")]
    DataUnavailable(String),
}

impl From<SourceError> for DashboardError {
    fn from(e: SourceError) -> Self {
        Self::DataUnavailable(e.to_string())
    }
}

impl From<DashboardError> for AppError {
    fn from(e: DashboardError) -> Self {
        Self::DataUnavailable(e.to_string())
    }
}
