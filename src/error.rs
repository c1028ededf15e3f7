//! Pipeline error kinds
//!
//! Every failure surfaces to the calling UI layer for user-initiated retry;
//! nothing in the core retries automatically.

use thiserror::Error;

use crate::planner::PlanGenerationError;
use crate::storage::StorageError;
use crate::wizard::ValidationError;

/// Errors surfaced by the wizard pipeline
#[derive(Debug, Error)]
pub enum WizardError {
    /// Local, recoverable: the step does not advance, no network involved
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Fatal to the materialization attempt; no partial writes attempted
    #[error("not signed in")]
    NotSignedIn,

    /// The aggregate is preserved so the user may retry without re-entering
    #[error("plan generation failed: {0}")]
    PlanGeneration(#[from] PlanGenerationError),

    /// May leave an orphaned goal row with zero subgoals; not rolled back
    #[error("persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

impl WizardError {
    /// Recoverable errors keep the wizard on the current step; everything
    /// else ends the attempt and is surfaced for user-initiated retry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WizardError::Validation(_))
    }
}
