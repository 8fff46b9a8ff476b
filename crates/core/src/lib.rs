//! Core dashboard logic for the Roda Bem console.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Raw records come from a [`source::DashboardSource`] collaborator; everything
//! derived from them (statistics, chart series, feeds, onboarding) lives here.
//!
//! # Modules
//!
//! - `period` - Reporting periods, time windows and chart buckets
//! - `source` - Data collaborator contract and an in-memory implementation
//! - `metrics` - Headline statistics per reporting period
//! - `chart` - Time-bucketed chart series
//! - `notifications` - Read/unread notification state
//! - `activity` - Recent activity feed
//! - `tutorial` - Step-based onboarding with settle timers
//! - `session` - Auth collaborator contract and page guards
//! - `dashboard` - Controller composing all of the above

pub mod activity;
pub mod chart;
pub mod dashboard;
pub mod metrics;
pub mod notifications;
pub mod period;
pub mod retry;
pub mod session;
pub mod source;
pub mod tutorial;
