//! Persisted goal records
//!
//! `NewGoal` and `SubgoalRow` are the rows the materializer writes through the
//! storage collaborator. Ids are assigned by the backend (or the in-memory
//! store in tests), so the insert payloads carry none.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Category, Priority};

/// Backend-assigned goal identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(pub String);

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Goal row created exactly once per successful materialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub user_id: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub priority: Priority,
    pub num_phases: u8,
    /// Always starts at phase 1
    pub current_phase: u32,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub eta_days: i64,
}

/// Subgoal status lifecycle; rows are always inserted as `Pending`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubgoalStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

/// A persisted, dated, status-tracked task derived from a SubgoalDraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgoalRow {
    pub goal_id: GoalId,
    /// Matches the originating phase's `phase_no`
    pub phase_number: u32,
    pub phase_name: String,
    pub subgoal_title: String,
    pub subgoal_description: String,
    pub status: SubgoalStatus,
    /// Assigned by the scheduling cursor, calendar-day granularity
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subgoal_status_default() {
        assert_eq!(SubgoalStatus::default(), SubgoalStatus::Pending);
    }

    #[test]
    fn test_subgoal_row_serde_date_format() {
        let row = SubgoalRow {
            goal_id: GoalId("g-1".to_string()),
            phase_number: 1,
            phase_name: "Foundations".to_string(),
            subgoal_title: "Read chapter 1".to_string(),
            subgoal_description: String::new(),
            status: SubgoalStatus::Pending,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        };

        let json = serde_json::to_value(&row).unwrap();
        // Calendar date, not a timestamp
        assert_eq!(json["due_date"], "2025-01-03");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_new_goal_serde() {
        let goal = NewGoal {
            user_id: "user-1".to_string(),
            title: "Pass TOEFL".to_string(),
            category: Category::Academic,
            description: String::new(),
            priority: Priority::High,
            num_phases: 2,
            current_phase: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            target_date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
            eta_days: 3,
        };

        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["category"], "academic");
        assert_eq!(json["start_date"], "2025-01-01");
        assert_eq!(json["current_phase"], 1);
    }
}
