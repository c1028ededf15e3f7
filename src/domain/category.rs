//! Goal categories and their detail schemas
//!
//! Each category carries its own strongly-typed detail record. The wizard
//! dispatches on the variant through exhaustive matches, so adding a category
//! is a compile-visible change.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The four goal categories selectable at the first wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Academic,
    Career,
    Personal,
    Habits,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Academic => write!(f, "academic"),
            Self::Career => write!(f, "career"),
            Self::Personal => write!(f, "personal"),
            Self::Habits => write!(f, "habits"),
        }
    }
}

/// Category-specific wizard answers
///
/// The four schemas are disjoint; the wire format tags the variant with the
/// category name so the plan-generation service sees the same shape as the
/// aggregate's `category` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CategoryDetails {
    Academic {
        academic_track: String,
        exam_type: String,
        target_level: String,
        /// Study days per week, 1..=7
        study_days: u8,
        /// Hours per study session, 0.5..=4.0 in half-hour steps
        session_hours: f32,
    },
    Career {
        career_path: String,
        career_field: String,
        deliverables: Vec<String>,
        /// 0.5..=20.0
        hours_per_week: f32,
        region: String,
    },
    Personal {
        personal_category: String,
        progress_mode: String,
        /// 1..=10
        difficulty: u8,
        partner_frequency: Option<String>,
    },
    Habits {
        habit_type: String,
        habit_freq: String,
        /// Minutes per session, 10..=90
        habit_minutes: u16,
        habit_method: Vec<String>,
    },
}

impl CategoryDetails {
    /// Default answers for a category, used when the detail step is shown
    /// before the user has touched anything
    pub fn default_for(category: Category) -> Self {
        debug!(%category, "default_for: called");
        match category {
            Category::Academic => Self::Academic {
                academic_track: String::new(),
                exam_type: String::new(),
                target_level: String::new(),
                study_days: 3,
                session_hours: 1.0,
            },
            Category::Career => Self::Career {
                career_path: String::new(),
                career_field: String::new(),
                deliverables: Vec::new(),
                hours_per_week: 5.0,
                region: String::new(),
            },
            Category::Personal => Self::Personal {
                personal_category: String::new(),
                progress_mode: String::new(),
                difficulty: 5,
                partner_frequency: None,
            },
            Category::Habits => Self::Habits {
                habit_type: String::new(),
                habit_freq: String::new(),
                habit_minutes: 30,
                habit_method: Vec::new(),
            },
        }
    }

    /// The category this detail record belongs to
    pub fn category(&self) -> Category {
        match self {
            Self::Academic { .. } => Category::Academic,
            Self::Career { .. } => Category::Career,
            Self::Personal { .. } => Category::Personal,
            Self::Habits { .. } => Category::Habits,
        }
    }
}
