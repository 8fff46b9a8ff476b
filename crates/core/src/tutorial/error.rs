//! Tutorial error types.

use rodabem_shared::AppError;
use thiserror::Error;

/// Tutorial errors.
#[derive(Debug, Error)]
pub enum TutorialError {
    /// The step name is not a known onboarding step.
    #[error("Unknown tutorial step: {0}")]
    UnknownStep(String),
}

impl From<TutorialError> for AppError {
    fn from(e: TutorialError) -> Self {
        Self::Validation(e.to_string())
    }
}
