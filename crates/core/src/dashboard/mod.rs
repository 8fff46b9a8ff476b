//! Dashboard orchestration.
//!
//! The controller owns the selected reporting period and the modal flags,
//! composes the data components into a [`DashboardView`] and publishes it to
//! subscribers.

pub mod controller;
pub mod error;
pub mod types;


pub use controller::DashboardController;
pub use error::DashboardError;
pub use types::{DashboardView, LoadState, ModalState, PeriodPanel, RefreshOutcome};
