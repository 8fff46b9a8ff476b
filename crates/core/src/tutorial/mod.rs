//! Step-based onboarding tutorial.
//!
//! This module separates the pure state machine from its timing:
//!
//! - `types` - Tutorial steps and route mapping
//! - `state` - Transitions over the active step and the completed set
//! - `engine` - Settle timers that complete a step the user stays on

pub mod engine;
pub mod error;
pub mod state;
pub mod types;

#[cfg(test)]
mod state_props;

pub use engine::TutorialEngine;
pub use error::TutorialError;
pub use state::{ArriveOutcome, TutorialSnapshot, TutorialState};
pub use types::TutorialStep;
