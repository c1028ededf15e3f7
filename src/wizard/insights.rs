//! Category-independent wizard answers
//!
//! The insight pages collect low-typing-burden answers (chips and sliders).
//! The schema is the same for every category; only the option sets shown by
//! the UI differ, which is out of scope here.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of simultaneously selected constraints
pub const MAX_CONSTRAINTS: usize = 2;

/// Constraint answer tied to the budget-dependent reveal
pub const BUDGET_CONSTRAINT: &str = "budget";

/// Capped multi-select with oldest-first eviction
///
/// Toggling an already-selected value removes it. Selecting a value beyond
/// the cap evicts the oldest selection, so the newest choice is always kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ConstraintSet {
    selected: Vec<String>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of `value`, enforcing the cap
    pub fn toggle(&mut self, value: impl Into<String>) {
        let value = value.into();
        debug!(%value, selected = self.selected.len(), "toggle: called");
        if let Some(pos) = self.selected.iter().position(|v| *v == value) {
            debug!(%value, "toggle: deselecting");
            self.selected.remove(pos);
            return;
        }

        self.selected.push(value);
        while self.selected.len() > MAX_CONSTRAINTS {
            let evicted = self.selected.remove(0);
            debug!(%evicted, "toggle: cap exceeded, evicting oldest");
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selections in insertion order, oldest first
    pub fn as_slice(&self) -> &[String] {
        &self.selected
    }
}

/// Wizard answers shared by all categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insights {
    /// Why the user is pursuing this goal
    pub intent: String,
    /// Preferred outcome style (measurable vs. directional)
    pub outcome_style: String,
    /// Selected constraints, capped at [`MAX_CONSTRAINTS`]
    pub constraints: ConstraintSet,
    /// Only meaningful while "budget" is among the constraints; omitted
    /// otherwise so partial payloads stay minimal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_cost_pref: Option<bool>,
    /// Weekly availability in hours
    pub hours_per_week: f32,
    /// Check-in cadence (daily, weekly, ...)
    pub cadence: String,
    /// Preferred coaching tone
    pub coach_style: String,
    /// Where the user works on the goal
    pub environment: String,
    /// Self-reported confidence, 1..=10
    pub confidence: u8,
}

impl Default for Insights {
    fn default() -> Self {
        Self {
            intent: String::new(),
            outcome_style: String::new(),
            constraints: ConstraintSet::new(),
            zero_cost_pref: None,
            hours_per_week: 5.0,
            cadence: String::new(),
            coach_style: String::new(),
            environment: String::new(),
            confidence: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut set = ConstraintSet::new();
        set.toggle("time");
        assert!(set.contains("time"));
        set.toggle("time");
        assert!(!set.contains("time"));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut set = ConstraintSet::new();
        set.toggle("time");
        set.toggle("budget");
        set.toggle("energy");

        assert_eq!(set.len(), MAX_CONSTRAINTS);
        assert!(!set.contains("time"), "oldest selection should be evicted");
        assert!(set.contains("budget"));
        assert!(set.contains("energy"), "newest selection must always be present");
    }

    #[test]
    fn test_deselect_below_cap_keeps_order() {
        let mut set = ConstraintSet::new();
        set.toggle("time");
        set.toggle("budget");
        set.toggle("budget");
        assert_eq!(set.as_slice(), ["time".to_string()]);
    }

    #[test]
    fn test_insights_default_omits_zero_cost() {
        let insights = Insights::default();
        let json = serde_json::to_value(&insights).unwrap();
        assert!(json.get("zero_cost_pref").is_none());
        assert_eq!(json["hours_per_week"], 5.0);
    }
}
