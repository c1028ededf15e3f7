//! goalsmith - goal-creation wizard and plan-materialization pipeline
//!
//! A personal goal starts as a multi-step wizard session: category selection
//! determines the question sets, answers accumulate in one mutable aggregate,
//! and the completed aggregate is handed to an external plan-generation
//! service. The returned phase/subgoal tree is then materialized into a
//! persisted goal plus a flat list of sequentially-dated subgoal rows.
//!
//! # Core Concepts
//!
//! - **One aggregate per session**: all wizard answers live in a single
//!   record threaded explicitly through the steps, merged through one entry
//!   point
//! - **Fixed step sequence**: category changes the content of later steps,
//!   never the sequence length
//! - **One day per subgoal**: scheduling walks the generated tree in array
//!   order, assigning consecutive calendar days across phase boundaries
//! - **No automatic retries**: every network failure surfaces to the UI
//!   layer; the aggregate survives so the user can retry
//!
//! # Modules
//!
//! - [`wizard`] - aggregate, step sequencing, validation, session orchestration
//! - [`planner`] - request building, generator boundary, materialization
//! - [`storage`] - goal persistence boundary and implementations
//! - [`auth`] - authenticated-user collaborator
//! - [`config`] - configuration types and loading

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod planner;
pub mod storage;
pub mod wizard;

/// Install the process-wide tracing subscriber
///
/// The embedding app calls this once at startup; the library itself never
/// installs a subscriber. `RUST_LOG` refines the base level as usual.
pub fn setup_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

// Re-export commonly used types
pub use auth::{AuthError, AuthProvider, StaticAuthProvider};
pub use config::{BackendConfig, Config, PlannerConfig};
pub use domain::{Category, CategoryDetails, GoalId, NewGoal, Phase, Priority, SubgoalDraft, SubgoalRow, SubgoalStatus};
pub use error::WizardError;
pub use planner::{
    HttpPlanGenerator, MaterializedGoal, PlanGenerationError, PlanGenerator, PlanMaterializer, PlanRequest,
};
pub use storage::{GoalStore, MemoryGoalStore, RestGoalStore, StorageError};
pub use wizard::{
    Advance, FormAggregate, FormPatch, FormStateStore, Insights, StepInput, StepSequencer, TimeMode, ValidationError,
    WizardSession, WizardStep,
};
