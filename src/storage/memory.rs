//! In-memory goal store
//!
//! Test double with failure-injection switches so the materializer's
//! partial-failure semantics (orphaned goal, no subgoal writes) can be
//! exercised without a backend.

use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{GoalId, NewGoal, SubgoalRow};

use super::{GoalStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    goals: Vec<(GoalId, NewGoal)>,
    subgoals: Vec<SubgoalRow>,
}

/// In-memory store; ids are locally generated UUIDv7s
#[derive(Debug, Default)]
pub struct MemoryGoalStore {
    inner: Mutex<Inner>,
    fail_goal_insert: bool,
    fail_subgoal_insert: bool,
}

impl MemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose goal insert always fails
    pub fn failing_goal_insert() -> Self {
        Self {
            fail_goal_insert: true,
            ..Self::default()
        }
    }

    /// Store whose subgoal batch always fails (goal insert succeeds)
    pub fn failing_subgoal_insert() -> Self {
        Self {
            fail_subgoal_insert: true,
            ..Self::default()
        }
    }

    /// Snapshot of inserted goals
    pub fn goals(&self) -> Vec<(GoalId, NewGoal)> {
        self.inner.lock().expect("store lock poisoned").goals.clone()
    }

    /// Snapshot of inserted subgoal rows
    pub fn subgoals(&self) -> Vec<SubgoalRow> {
        self.inner.lock().expect("store lock poisoned").subgoals.clone()
    }
}

#[async_trait::async_trait]
impl GoalStore for MemoryGoalStore {
    async fn insert_goal(&self, goal: &NewGoal) -> Result<GoalId, StorageError> {
        debug!(title = %goal.title, "insert_goal: called");
        if self.fail_goal_insert {
            debug!("insert_goal: injected failure");
            return Err(StorageError::Backend {
                status: 500,
                body: "injected goal insert failure".to_string(),
            });
        }

        let id = GoalId(Uuid::now_v7().to_string());
        self.inner
            .lock()
            .expect("store lock poisoned")
            .goals
            .push((id.clone(), goal.clone()));
        Ok(id)
    }

    async fn insert_subgoals(&self, rows: &[SubgoalRow]) -> Result<(), StorageError> {
        debug!(row_count = rows.len(), "insert_subgoals: called");
        if self.fail_subgoal_insert {
            debug!("insert_subgoals: injected failure");
            return Err(StorageError::Backend {
                status: 500,
                body: "injected subgoal batch failure".to_string(),
            });
        }

        self.inner
            .lock()
            .expect("store lock poisoned")
            .subgoals
            .extend_from_slice(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority, SubgoalStatus};
    use chrono::NaiveDate;

    fn sample_goal() -> NewGoal {
        NewGoal {
            user_id: "user-1".to_string(),
            title: "Test".to_string(),
            category: Category::Personal,
            description: String::new(),
            priority: Priority::Medium,
            num_phases: 3,
            current_phase: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            target_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            eta_days: 31,
        }
    }

    #[tokio::test]
    async fn test_insert_goal_assigns_id() {
        let store = MemoryGoalStore::new();
        let id = store.insert_goal(&sample_goal()).await.unwrap();
        assert!(!id.0.is_empty());
        assert_eq!(store.goals().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_goal_insert() {
        let store = MemoryGoalStore::failing_goal_insert();
        assert!(store.insert_goal(&sample_goal()).await.is_err());
        assert!(store.goals().is_empty());
    }

    #[tokio::test]
    async fn test_insert_subgoals_batch() {
        let store = MemoryGoalStore::new();
        let id = store.insert_goal(&sample_goal()).await.unwrap();
        let rows = vec![SubgoalRow {
            goal_id: id,
            phase_number: 1,
            phase_name: "Phase 1".to_string(),
            subgoal_title: "a".to_string(),
            subgoal_description: String::new(),
            status: SubgoalStatus::Pending,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }];
        store.insert_subgoals(&rows).await.unwrap();
        assert_eq!(store.subgoals().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_subgoal_insert_leaves_goal() {
        let store = MemoryGoalStore::failing_subgoal_insert();
        let id = store.insert_goal(&sample_goal()).await.unwrap();
        let rows = vec![SubgoalRow {
            goal_id: id,
            phase_number: 1,
            phase_name: "Phase 1".to_string(),
            subgoal_title: "a".to_string(),
            subgoal_description: String::new(),
            status: SubgoalStatus::Pending,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }];
        assert!(store.insert_subgoals(&rows).await.is_err());
        assert_eq!(store.goals().len(), 1);
        assert!(store.subgoals().is_empty());
    }
}
