//! Goal persistence boundary
//!
//! The pipeline terminates at two writes: one goal row, then one batched
//! subgoal insert. The underlying store provides no cross-row atomicity, so a
//! failing batch after a successful goal insert leaves an orphaned goal.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{GoalId, NewGoal, SubgoalRow};

mod memory;
mod rest;

pub use memory::MemoryGoalStore;
pub use rest::RestGoalStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("backend error {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Persistence collaborator for goals and their subgoal rows
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Insert the goal record, returning its backend-assigned id
    async fn insert_goal(&self, goal: &NewGoal) -> Result<GoalId, StorageError>;

    /// Insert all subgoal rows in a single batch
    ///
    /// Callers must treat a failure as all-or-nothing: the store gives no
    /// guarantee about which rows of a failed batch landed.
    async fn insert_subgoals(&self, rows: &[SubgoalRow]) -> Result<(), StorageError>;
}
