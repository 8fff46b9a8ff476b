//! Pure tutorial state machine.
//!
//! States: no active step, or one active step, alongside the set of completed
//! steps. Completion is monotonic until an explicit reset.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::types::TutorialStep;

/// Result of arriving at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArriveOutcome {
    /// The step is now active and should settle after the delay.
    Activated,
    /// The step is already completed; it is not reopened.
    AlreadyCompleted,
}

/// Tutorial progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorialState {
    active: Option<TutorialStep>,
    completed: BTreeSet<TutorialStep>,
}

impl TutorialState {
    /// Fresh tutorial with nothing active or completed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The user reached `step`.
    ///
    /// A completed step is never reactivated. Either way the previously
    /// active step stops being active: the user has left it.
    pub fn arrive_at(&mut self, step: TutorialStep) -> ArriveOutcome {
        if self.completed.contains(&step) {
            self.active = None;
            ArriveOutcome::AlreadyCompleted
        } else {
            self.active = Some(step);
            ArriveOutcome::Activated
        }
    }

    /// The user navigated somewhere that is not a tutorial step.
    pub fn leave(&mut self) {
        self.active = None;
    }

    /// The settle delay for `step` elapsed.
    ///
    /// Completes the step only if it is still the active one. Returns true if
    /// the step moved to the completed set.
    pub fn settle(&mut self, step: TutorialStep) -> bool {
        if self.active != Some(step) {
            return false;
        }
        self.active = None;
        self.completed.insert(step)
    }

    /// Clears all progress.
    pub fn reset(&mut self) {
        self.active = None;
        self.completed.clear();
    }

    /// Currently active step.
    #[must_use]
    pub const fn active(&self) -> Option<TutorialStep> {
        self.active
    }

    /// Returns true if `step` is completed.
    #[must_use]
    pub fn is_completed(&self, step: TutorialStep) -> bool {
        self.completed.contains(&step)
    }

    /// Completed steps in onboarding order.
    pub fn completed(&self) -> impl Iterator<Item = TutorialStep> + '_ {
        self.completed.iter().copied()
    }

    /// Returns true once every step is completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        TutorialStep::ALL.iter().all(|s| self.completed.contains(s))
    }

    /// Serializable view of the state.
    #[must_use]
    pub fn snapshot(&self) -> TutorialSnapshot {
        TutorialSnapshot {
            active: self.active,
            completed: self.completed().collect(),
            finished: self.is_finished(),
        }
    }
}

/// Published view of tutorial progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialSnapshot {
    /// Active step, if any.
    pub active: Option<TutorialStep>,
    /// Completed steps in onboarding order.
    pub completed: Vec<TutorialStep>,
    /// True once every step is completed.
    pub finished: bool,
}
