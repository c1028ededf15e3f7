//! Wizard session orchestration
//!
//! One session per in-progress goal definition. The session owns the
//! aggregate exclusively (all methods take `&mut self`, so overlapping calls
//! cannot happen on one session) and wires the step machinery to the two
//! network collaborators. Dropping the session discards the aggregate:
//! wizard progress does not survive an app restart.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::Phase;
use crate::error::WizardError;
use crate::planner::{self, MaterializedGoal, PlanGenerator, PlanMaterializer};

use super::aggregate::{FormAggregate, FormStateStore};
use super::sequencer::{Advance, StepSequencer, WizardStep};
use super::validators::{self, StepInput, ValidationError};

/// Orchestrates one wizard run from category selection to materialization
pub struct WizardSession {
    store: FormStateStore,
    sequencer: StepSequencer,
    generator: Arc<dyn PlanGenerator>,
    materializer: PlanMaterializer,
}

impl WizardSession {
    pub fn new(generator: Arc<dyn PlanGenerator>, materializer: PlanMaterializer) -> Self {
        Self {
            store: FormStateStore::new(),
            sequencer: StepSequencer::new(),
            generator,
            materializer,
        }
    }

    /// Read-only view of the in-progress aggregate
    pub fn aggregate(&self) -> &FormAggregate {
        self.store.get()
    }

    pub fn current_step(&self) -> WizardStep {
        self.sequencer.current_step()
    }

    /// Validate, merge, and advance past the current step
    ///
    /// On a validation failure nothing is merged and the position is
    /// unchanged; the caller re-collects input for the same step.
    pub fn submit_step(&mut self, input: StepInput) -> Result<Advance, WizardError> {
        let step = self.sequencer.current_step();
        debug!(?step, "submit_step: called");

        let patch = validators::validate(step, input, self.store.get())?;
        self.store.merge(patch);
        Ok(self.sequencer.next())
    }

    /// Go back one step; answers already merged stay merged
    pub fn back(&mut self) -> WizardStep {
        debug!("back: called");
        self.sequencer.prev()
    }

    /// Build the request payload and obtain a plan from the generator
    ///
    /// Only valid on the review step. The aggregate is preserved across
    /// failures so the user may retry without re-entering the wizard.
    pub async fn generate_plan(&mut self) -> Result<&[Phase], WizardError> {
        let step = self.sequencer.current_step();
        debug!(?step, "generate_plan: called");
        if step != WizardStep::Review {
            debug!(?step, "generate_plan: not on review step");
            return Err(ValidationError::WrongStep(WizardStep::Review).into());
        }

        let request = planner::build(self.store.get());
        let phases = self.generator.generate(&request).await?;
        info!(phase_count = phases.len(), "generate_plan: plan received");

        self.store.merge(super::aggregate::FormPatch {
            ai_plan: Some(phases),
            ..Default::default()
        });
        Ok(self.store.get().ai_plan.as_deref().unwrap_or_default())
    }

    /// Persist the generated plan as a goal plus dated subgoal rows
    ///
    /// On success the session moves to the result step; the aggregate is
    /// discarded when the session is dropped.
    pub async fn materialize(&mut self) -> Result<MaterializedGoal, WizardError> {
        debug!("materialize: called");
        let aggregate = self.store.get();
        let Some(phases) = aggregate.ai_plan.clone() else {
            debug!("materialize: no plan generated yet");
            return Err(ValidationError::WrongStep(WizardStep::Review).into());
        };

        let result = self.materializer.materialize(aggregate, &phases).await?;

        self.sequencer.next();
        info!(goal_id = %result.goal_id, "materialize: session complete");
        Ok(result)
    }
}
