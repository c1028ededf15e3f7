//! Per-step validation and normalization
//!
//! Each step's locally collected fields arrive as a [`StepInput`]; the
//! validator decides whether they may be merged into the aggregate and
//! normalizes them on the way in (clamps, derived dates, conditional
//! omission). Only the basics step can actually block advancing; every
//! other step accepts empty or default answers.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Category, CategoryDetails, Priority};
use crate::planner::resolve_target_date;

use super::aggregate::{FormAggregate, FormPatch, TimeMode};
use super::insights::BUDGET_CONSTRAINT;
use super::sequencer::WizardStep;

/// Local, recoverable errors: the step does not advance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a goal title is required")]
    MissingTitle,

    #[error("target date {target} is before start date {start}")]
    TargetBeforeStart { start: NaiveDate, target: NaiveDate },

    #[error("select a category before answering category details")]
    CategoryNotSelected,

    #[error("detail answers are for {got} but the selected category is {expected}")]
    CategoryMismatch { expected: Category, got: Category },

    #[error("input does not belong to the {0:?} step")]
    WrongStep(WizardStep),
}

/// Fields collected locally by a single step
#[derive(Debug, Clone)]
pub enum StepInput {
    Category {
        category: Category,
    },
    Basics {
        title: String,
        start_date: NaiveDate,
        time_mode: TimeMode,
    },
    Structure {
        priority: Priority,
        num_phases: u8,
    },
    InsightsFocus {
        intent: String,
        outcome_style: String,
        /// Chip toggles in the order the user tapped them
        constraint_toggles: Vec<String>,
        /// Only honored while "budget" ends up among the constraints
        zero_cost_pref: Option<bool>,
    },
    InsightsRhythm {
        hours_per_week: f32,
        cadence: String,
        coach_style: String,
        environment: String,
        confidence: u8,
    },
    CategoryDetail(CategoryDetails),
    CategoryElaborate {
        motivation: String,
        additional_info: String,
    },
    /// Review and result collect nothing
    None,
}

impl StepInput {
    /// The step this input belongs to
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            Self::Category { .. } => Some(WizardStep::Category),
            Self::Basics { .. } => Some(WizardStep::Basics),
            Self::Structure { .. } => Some(WizardStep::Structure),
            Self::InsightsFocus { .. } => Some(WizardStep::InsightsFocus),
            Self::InsightsRhythm { .. } => Some(WizardStep::InsightsRhythm),
            Self::CategoryDetail(_) => Some(WizardStep::CategoryDetail),
            Self::CategoryElaborate { .. } => Some(WizardStep::CategoryElaborate),
            Self::None => None,
        }
    }
}

/// Validate and normalize one step's input against the current aggregate
///
/// On success the returned patch is ready for [`FormStateStore::merge`];
/// on failure nothing may be merged and the sequencer must not advance.
///
/// [`FormStateStore::merge`]: super::aggregate::FormStateStore::merge
pub fn validate(step: WizardStep, input: StepInput, aggregate: &FormAggregate) -> Result<FormPatch, ValidationError> {
    debug!(?step, "validate: called");

    if let Some(input_step) = input.step()
        && input_step != step
    {
        debug!(?input_step, "validate: input belongs to a different step");
        return Err(ValidationError::WrongStep(step));
    }

    match input {
        StepInput::Category { category } => Ok(FormPatch {
            category: Some(category),
            ..Default::default()
        }),

        StepInput::Basics {
            title,
            start_date,
            time_mode,
        } => validate_basics(title, start_date, time_mode),

        StepInput::Structure { priority, num_phases } => Ok(FormPatch {
            priority: Some(priority),
            num_phases: Some(num_phases.clamp(1, 5)),
            ..Default::default()
        }),

        StepInput::InsightsFocus {
            intent,
            outcome_style,
            constraint_toggles,
            zero_cost_pref,
        } => {
            let mut insights = aggregate.insights.clone();
            insights.intent = intent;
            insights.outcome_style = outcome_style;
            for toggle in constraint_toggles {
                insights.constraints.toggle(toggle);
            }
            // Conditional reveal: the zero-cost toggle only exists while
            // "budget" is selected. Omit it entirely otherwise.
            insights.zero_cost_pref = if insights.constraints.contains(BUDGET_CONSTRAINT) {
                zero_cost_pref
            } else {
                debug!("validate: budget not selected, omitting zero_cost_pref");
                None
            };
            Ok(FormPatch {
                insights: Some(insights),
                ..Default::default()
            })
        }

        StepInput::InsightsRhythm {
            hours_per_week,
            cadence,
            coach_style,
            environment,
            confidence,
        } => {
            let mut insights = aggregate.insights.clone();
            insights.hours_per_week = hours_per_week.max(0.5);
            insights.cadence = cadence;
            insights.coach_style = coach_style;
            insights.environment = environment;
            insights.confidence = confidence.clamp(1, 10);
            Ok(FormPatch {
                insights: Some(insights),
                ..Default::default()
            })
        }

        StepInput::CategoryDetail(details) => validate_category_detail(details, aggregate),

        StepInput::CategoryElaborate {
            motivation,
            additional_info,
        } => Ok(FormPatch {
            motivation: Some(motivation),
            additional_info: Some(additional_info),
            ..Default::default()
        }),

        // Only the review and result steps collect nothing; an empty input
        // anywhere else must not advance past a step's required fields.
        StepInput::None => match step {
            WizardStep::Review | WizardStep::Result => Ok(FormPatch::default()),
            other => {
                debug!(?other, "validate: empty input on a collecting step");
                Err(ValidationError::WrongStep(other))
            }
        },
    }
}

fn validate_basics(title: String, start_date: NaiveDate, time_mode: TimeMode) -> Result<FormPatch, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        debug!("validate_basics: title is empty");
        return Err(ValidationError::MissingTitle);
    }

    // Recompute the timeframe whenever either date changes; an explicit
    // target before the start can never produce a valid eta.
    if let TimeMode::Explicit { target_date } = time_mode
        && target_date < start_date
    {
        debug!(%start_date, %target_date, "validate_basics: target before start");
        return Err(ValidationError::TargetBeforeStart {
            start: start_date,
            target: target_date,
        });
    }
    let target = resolve_target_date(start_date, time_mode);
    debug!(%start_date, %target, "validate_basics: timeframe resolved");

    Ok(FormPatch {
        title: Some(trimmed.to_string()),
        start_date: Some(start_date),
        time_mode: Some(time_mode),
        ..Default::default()
    })
}

fn validate_category_detail(details: CategoryDetails, aggregate: &FormAggregate) -> Result<FormPatch, ValidationError> {
    let Some(selected) = aggregate.category else {
        debug!("validate_category_detail: no category selected");
        return Err(ValidationError::CategoryNotSelected);
    };
    if details.category() != selected {
        debug!(expected = %selected, got = %details.category(), "validate_category_detail: mismatch");
        return Err(ValidationError::CategoryMismatch {
            expected: selected,
            got: details.category(),
        });
    }

    Ok(FormPatch {
        category_details: Some(clamp_details(details)),
        ..Default::default()
    })
}

/// Clamp each variant's numeric fields to its documented range
fn clamp_details(details: CategoryDetails) -> CategoryDetails {
    match details {
        CategoryDetails::Academic {
            academic_track,
            exam_type,
            target_level,
            study_days,
            session_hours,
        } => CategoryDetails::Academic {
            academic_track,
            exam_type,
            target_level,
            study_days: study_days.clamp(1, 7),
            session_hours: round_to_half(session_hours.clamp(0.5, 4.0)),
        },
        CategoryDetails::Career {
            career_path,
            career_field,
            deliverables,
            hours_per_week,
            region,
        } => CategoryDetails::Career {
            career_path,
            career_field,
            deliverables,
            hours_per_week: hours_per_week.clamp(0.5, 20.0),
            region,
        },
        CategoryDetails::Personal {
            personal_category,
            progress_mode,
            difficulty,
            partner_frequency,
        } => CategoryDetails::Personal {
            personal_category,
            progress_mode,
            difficulty: difficulty.clamp(1, 10),
            partner_frequency,
        },
        CategoryDetails::Habits {
            habit_type,
            habit_freq,
            habit_minutes,
            habit_method,
        } => CategoryDetails::Habits {
            habit_type,
            habit_freq,
            habit_minutes: habit_minutes.clamp(10, 90),
            habit_method,
        },
    }
}

/// Session hours move in half-hour steps
fn round_to_half(value: f32) -> f32 {
    (value * 2.0).round() / 2.0
}
