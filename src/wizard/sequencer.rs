//! Wizard step sequencing
//!
//! There is exactly one step list for all categories. The category answer
//! changes the *content* of the category-detail steps, never the sequence
//! length, so no step is ever skipped at runtime and navigating to an
//! inapplicable step is impossible by construction.

use tracing::debug;

/// The canonical wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Category selection: determines the content of later detail steps
    Category,
    /// Title, timeframe, start date
    Basics,
    /// Priority, number of phases
    Structure,
    /// Intent, outcome style, constraints
    InsightsFocus,
    /// Availability, cadence, environment
    InsightsRhythm,
    /// Category-specific chips and sliders
    CategoryDetail,
    /// Category-specific free-text elaboration
    CategoryElaborate,
    /// Terminal review step: payload built, plan generated here
    Review,
    /// Post-materialization result screen
    Result,
}

/// Canonical ordering; the sequencer never reorders or filters this
pub const STEP_ORDER: [WizardStep; 9] = [
    WizardStep::Category,
    WizardStep::Basics,
    WizardStep::Structure,
    WizardStep::InsightsFocus,
    WizardStep::InsightsRhythm,
    WizardStep::CategoryDetail,
    WizardStep::CategoryElaborate,
    WizardStep::Review,
    WizardStep::Result,
];

/// Outcome of asking the sequencer to advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the step at the contained index
    Moved(WizardStep),
    /// Already on the terminal step; the wizard is complete
    Complete,
}

/// Tracks the current position in the fixed step list
#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    current: usize,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the current step
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current step
    pub fn current_step(&self) -> WizardStep {
        STEP_ORDER[self.current]
    }

    /// Whether the current step is the last one
    pub fn is_terminal(&self) -> bool {
        self.current == STEP_ORDER.len() - 1
    }

    /// Move to the next step, or report completion at the terminal step
    pub fn next(&mut self) -> Advance {
        debug!(current = self.current, "next: called");
        if self.is_terminal() {
            debug!("next: terminal step, wizard complete");
            return Advance::Complete;
        }
        self.current += 1;
        debug!(current = self.current, "next: advanced");
        Advance::Moved(self.current_step())
    }

    /// Move to the previous step, floored at the first step
    pub fn prev(&mut self) -> WizardStep {
        debug!(current = self.current, "prev: called");
        self.current = self.current.saturating_sub(1);
        self.current_step()
    }

    /// Jump to an absolute index; out-of-range indices are rejected
    pub fn jump(&mut self, index: usize) -> Option<WizardStep> {
        debug!(index, "jump: called");
        if index >= STEP_ORDER.len() {
            debug!(index, "jump: out of range");
            return None;
        }
        self.current = index;
        Some(self.current_step())
    }
}
