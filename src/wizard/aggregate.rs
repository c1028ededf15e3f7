//! The wizard's single mutable aggregate
//!
//! One `FormAggregate` lives for the duration of a wizard session and is
//! threaded explicitly through the sequencer and validators; there is no
//! ambient singleton. All propagation between steps goes through
//! [`FormStateStore::merge`] with a [`FormPatch`].

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Category, CategoryDetails, Phase, Priority};

use super::insights::Insights;

/// How the target date is expressed at the basics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimeMode {
    /// Explicit calendar target date
    Explicit { target_date: NaiveDate },
    /// "N months from start", resolved with end-of-month clamping
    MonthsFromStart { months: u32 },
}

/// The single evolving record collecting all wizard answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormAggregate {
    /// Unset until the category step is answered; later steps branch on it
    pub category: Option<Category>,
    pub title: String,
    pub description: String,
    pub motivation: String,
    pub additional_info: String,
    pub start_date: NaiveDate,
    pub time_mode: TimeMode,
    /// 1..=5, default 3
    pub num_phases: u8,
    pub priority: Priority,
    pub insights: Insights,
    /// Schema selected entirely by `category`; stale answers from a previous
    /// category are preserved on switch (documented product behavior)
    pub category_details: Option<CategoryDetails>,
    /// Present only after the plan generator responds; a generated-but-empty
    /// plan is distinct from no plan at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_plan: Option<Vec<Phase>>,
}

impl Default for FormAggregate {
    fn default() -> Self {
        Self {
            category: None,
            title: String::new(),
            description: String::new(),
            motivation: String::new(),
            additional_info: String::new(),
            start_date: Utc::now().date_naive(),
            time_mode: TimeMode::MonthsFromStart { months: 1 },
            num_phases: 3,
            priority: Priority::default(),
            insights: Insights::default(),
            category_details: None,
            ai_plan: None,
        }
    }
}

impl FormAggregate {
    /// Whether the generator has already produced a plan for this session
    pub fn has_plan(&self) -> bool {
        self.ai_plan.is_some()
    }
}

/// Partial update produced by a step's validator
///
/// Every `Some` field replaces the aggregate's field wholesale; nested
/// records are not deep-merged, a step re-supplies the whole nested value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPatch {
    pub category: Option<Category>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub motivation: Option<String>,
    pub additional_info: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub time_mode: Option<TimeMode>,
    pub num_phases: Option<u8>,
    pub priority: Option<Priority>,
    pub insights: Option<Insights>,
    pub category_details: Option<CategoryDetails>,
    pub ai_plan: Option<Vec<Phase>>,
}

/// Holds the aggregate and applies shallow merges
///
/// No step mutates a prior step's answers implicitly; the only write path is
/// `merge`.
#[derive(Debug, Default)]
pub struct FormStateStore {
    aggregate: FormAggregate,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current aggregate
    pub fn get(&self) -> &FormAggregate {
        &self.aggregate
    }

    /// Shallow-merge `patch` into the aggregate
    pub fn merge(&mut self, patch: FormPatch) {
        debug!("merge: called");
        let agg = &mut self.aggregate;
        if let Some(v) = patch.category {
            debug!(category = %v, "merge: category");
            agg.category = Some(v);
        }
        if let Some(v) = patch.title {
            agg.title = v;
        }
        if let Some(v) = patch.description {
            agg.description = v;
        }
        if let Some(v) = patch.motivation {
            agg.motivation = v;
        }
        if let Some(v) = patch.additional_info {
            agg.additional_info = v;
        }
        if let Some(v) = patch.start_date {
            agg.start_date = v;
        }
        if let Some(v) = patch.time_mode {
            agg.time_mode = v;
        }
        if let Some(v) = patch.num_phases {
            agg.num_phases = v;
        }
        if let Some(v) = patch.priority {
            agg.priority = v;
        }
        if let Some(v) = patch.insights {
            agg.insights = v;
        }
        if let Some(v) = patch.category_details {
            agg.category_details = Some(v);
        }
        if let Some(v) = patch.ai_plan {
            agg.ai_plan = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aggregate() {
        let agg = FormAggregate::default();
        assert!(agg.category.is_none());
        assert_eq!(agg.num_phases, 3);
        assert_eq!(agg.priority, Priority::Medium);
        assert!(!agg.has_plan());
    }

    #[test]
    fn test_merge_replaces_only_present_fields() {
        let mut store = FormStateStore::new();
        store.merge(FormPatch {
            title: Some("Pass TOEFL".to_string()),
            ..Default::default()
        });
        store.merge(FormPatch {
            num_phases: Some(5),
            ..Default::default()
        });

        let agg = store.get();
        assert_eq!(agg.title, "Pass TOEFL");
        assert_eq!(agg.num_phases, 5);
        assert!(agg.description.is_empty());
    }

    #[test]
    fn test_merge_replaces_nested_wholesale() {
        let mut store = FormStateStore::new();

        let mut insights = Insights::default();
        insights.intent = "exam".to_string();
        insights.cadence = "daily".to_string();
        store.merge(FormPatch {
            insights: Some(insights),
            ..Default::default()
        });

        // A later patch supplies a fresh Insights; the old cadence is gone
        // because nested records are replaced, not deep-merged.
        let mut replacement = Insights::default();
        replacement.intent = "career".to_string();
        store.merge(FormPatch {
            insights: Some(replacement),
            ..Default::default()
        });

        let agg = store.get();
        assert_eq!(agg.insights.intent, "career");
        assert!(agg.insights.cadence.is_empty());
    }

    #[test]
    fn test_category_switch_preserves_stale_details() {
        let mut store = FormStateStore::new();
        store.merge(FormPatch {
            category: Some(Category::Academic),
            category_details: Some(CategoryDetails::default_for(Category::Academic)),
            ..Default::default()
        });

        // Switch category without re-answering the detail step
        store.merge(FormPatch {
            category: Some(Category::Career),
            ..Default::default()
        });

        let agg = store.get();
        assert_eq!(agg.category, Some(Category::Career));
        // Stale academic answers remain until the detail step overwrites them
        assert_eq!(
            agg.category_details.as_ref().map(|d| d.category()),
            Some(Category::Academic)
        );
    }
}
