//! Plan materialization
//!
//! Expands the generator's phase/subgoal tree into one persisted goal row
//! plus a flat, sequentially-dated list of subgoal rows. The scheduling
//! cursor advances exactly one calendar day per subgoal in traversal order;
//! phase boundaries neither reset nor pad it.

use std::sync::Arc;

use chrono::Days;
use tracing::{debug, info, warn};

use crate::auth::AuthProvider;
use crate::domain::{GoalId, NewGoal, Phase, SubgoalRow, SubgoalStatus};
use crate::error::WizardError;
use crate::storage::GoalStore;
use crate::wizard::FormAggregate;

use super::request::{eta_days, resolve_target_date};

/// Result of a successful materialization, handed to the result screen
#[derive(Debug, Clone)]
pub struct MaterializedGoal {
    pub goal_id: GoalId,
    /// Dated rows in traversal order, exactly as persisted
    pub subgoals: Vec<SubgoalRow>,
}

/// Persists a generated plan as a goal plus dated subgoal rows
pub struct PlanMaterializer {
    store: Arc<dyn GoalStore>,
    auth: Arc<dyn AuthProvider>,
}

impl PlanMaterializer {
    pub fn new(store: Arc<dyn GoalStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }

    /// Materialize `phases` for the aggregate's goal
    ///
    /// Failure semantics: a failed goal insert writes nothing else; a failed
    /// subgoal batch after a successful goal insert leaves the goal row
    /// orphaned with zero subgoals (no compensating delete; the store gives
    /// no cross-row atomicity, so the window is surfaced, not hidden).
    pub async fn materialize(
        &self,
        aggregate: &FormAggregate,
        phases: &[Phase],
    ) -> Result<MaterializedGoal, WizardError> {
        debug!(title = %aggregate.title, phase_count = phases.len(), "materialize: called");

        let user_id = self
            .auth
            .current_user_id()
            .await
            .map_err(|_| WizardError::NotSignedIn)?;

        let goal = build_goal(aggregate, &user_id);
        let goal_id = self.store.insert_goal(&goal).await?;
        info!(%goal_id, title = %goal.title, "materialize: goal created");

        let rows = schedule_subgoals(&goal_id, phases, aggregate.start_date);
        debug!(row_count = rows.len(), "materialize: subgoal rows built");

        if let Err(e) = self.store.insert_subgoals(&rows).await {
            warn!(%goal_id, error = %e, "materialize: subgoal batch failed, goal row is orphaned");
            return Err(e.into());
        }

        info!(%goal_id, subgoal_count = rows.len(), "materialize: complete");
        Ok(MaterializedGoal {
            goal_id,
            subgoals: rows,
        })
    }
}

/// Build the goal row from aggregate fields
fn build_goal(aggregate: &FormAggregate, user_id: &str) -> NewGoal {
    let start = aggregate.start_date;
    let target = resolve_target_date(start, aggregate.time_mode);

    NewGoal {
        user_id: user_id.to_string(),
        title: aggregate.title.clone(),
        // Fallback category; unreachable when the category step ran, but the
        // builder stays defensive rather than panicking on a raw aggregate.
        category: aggregate.category.unwrap_or(crate::domain::Category::Personal),
        description: aggregate.description.clone(),
        priority: aggregate.priority,
        num_phases: aggregate.num_phases,
        current_phase: 1,
        start_date: start,
        target_date: target,
        eta_days: eta_days(start, target),
    }
}

/// Assign due dates: the i-th subgoal in full traversal order (0-indexed)
/// is due `start_date + i` days, regardless of phase boundaries
fn schedule_subgoals(goal_id: &GoalId, phases: &[Phase], start_date: chrono::NaiveDate) -> Vec<SubgoalRow> {
    let mut rows = Vec::with_capacity(Phase::total_subgoals(phases));
    let mut pointer = start_date;

    // Array order is authoritative; phase_no is carried as metadata only.
    for phase in phases {
        for subgoal in &phase.subgoals {
            rows.push(SubgoalRow {
                goal_id: goal_id.clone(),
                phase_number: phase.phase_no,
                phase_name: phase.title.clone(),
                subgoal_title: subgoal.title.clone(),
                subgoal_description: String::new(),
                status: SubgoalStatus::Pending,
                due_date: pointer,
            });
            pointer = pointer + Days::new(1);
        }
    }

    rows
}
