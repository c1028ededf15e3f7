//! The goal-creation wizard
//!
//! A multi-step, category-conditional data-collection flow accumulating one
//! mutable aggregate. Steps validate and normalize their local fields, merge
//! them through the state store, and the sequencer moves a cursor over the
//! single canonical step list.

mod aggregate;
mod insights;
mod sequencer;
mod session;
mod validators;

pub use aggregate::{FormAggregate, FormPatch, FormStateStore, TimeMode};
pub use insights::{BUDGET_CONSTRAINT, ConstraintSet, Insights, MAX_CONSTRAINTS};
pub use sequencer::{Advance, STEP_ORDER, StepSequencer, WizardStep};
pub use session::WizardSession;
pub use validators::{StepInput, ValidationError, validate};
