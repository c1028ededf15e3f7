//! Generator output schema
//!
//! The plan-generation service returns an ordered array of phases, each with
//! title-only subgoal drafts. These types are read-only to the pipeline:
//! array order, not `phase_no`, drives scheduling.

use serde::{Deserialize, Serialize};

/// A generator-defined grouping of subgoals with an ordinal position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// 1-based, contiguous in a well-formed plan; carried as metadata
    pub phase_no: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub subgoals: Vec<SubgoalDraft>,
}

/// A title-only subgoal as returned by the plan generator, pre-scheduling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgoalDraft {
    pub title: String,
}

impl Phase {
    /// Total subgoal count across a plan, in traversal order
    pub fn total_subgoals(phases: &[Phase]) -> usize {
        phases.iter().map(|p| p.subgoals.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_deserialize() {
        let json = r#"{
            "phase_no": 1,
            "title": "Foundations",
            "summary": "Build the base",
            "subgoals": [{"title": "Read chapter 1"}, {"title": "Take notes"}]
        }"#;

        let phase: Phase = serde_json::from_str(json).unwrap();
        assert_eq!(phase.phase_no, 1);
        assert_eq!(phase.subgoals.len(), 2);
        assert_eq!(phase.subgoals[0].title, "Read chapter 1");
    }

    #[test]
    fn test_phase_deserialize_without_summary() {
        let json = r#"{"phase_no": 2, "title": "Practice", "subgoals": []}"#;
        let phase: Phase = serde_json::from_str(json).unwrap();
        assert!(phase.summary.is_none());
        assert!(phase.subgoals.is_empty());
    }

    #[test]
    fn test_total_subgoals() {
        let phases: Vec<Phase> = serde_json::from_str(
            r#"[
                {"phase_no": 1, "title": "A", "subgoals": [{"title": "a"}, {"title": "b"}]},
                {"phase_no": 2, "title": "B", "subgoals": [{"title": "c"}]}
            ]"#,
        )
        .unwrap();
        assert_eq!(Phase::total_subgoals(&phases), 3);
    }
}
