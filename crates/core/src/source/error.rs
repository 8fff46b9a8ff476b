//! Data source error types.

use thiserror::Error;

/// Errors reported by a [`super::DashboardSource`].
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The backend could not be reached or refused to serve.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete in time.
    #[error("Data source timed out")]
    Timeout,

    /// The backend answered with data that cannot be used.
    #[error("Invalid data from source: {0}")]
    Invalid(String),
}

impl SourceError {
    /// Returns true if repeating the call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout)
    }
}
