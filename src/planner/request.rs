//! Plan request assembly
//!
//! Converts a completed aggregate into the normalized payload the
//! plan-generation service expects: canonical dates, derived eta, and a
//! stable `context` shape where absent maps are empty objects, never null.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::domain::{Category, Priority};
use crate::wizard::{FormAggregate, TimeMode};

/// Fallback title; unreachable when the basics validator ran, but the
/// builder stays defensive
const UNTITLED: &str = "Untitled Goal";

/// Request payload for the plan-generation service
#[derive(Debug, Clone, Serialize)]
pub struct PlanRequest {
    pub title: String,
    pub category: Option<Category>,
    pub description: String,
    pub motivation: String,
    pub priority: Priority,
    pub time_mode: TimeMode,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub eta_days: i64,
    pub num_phases: u8,
    pub context: PlanContext,
}

/// Nested context sent alongside the headline fields
///
/// The generator always receives every key; maps default to `{}`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanContext {
    pub insights: serde_json::Value,
    pub category_details: serde_json::Value,
    pub constraints: Vec<String>,
    pub cadence: String,
    pub environment: String,
    pub outcome: String,
    pub notes: String,
}

/// Add calendar months with end-of-month clamping
///
/// Jan 31 + 1 month yields the last valid day of February, never an
/// overflowed date.
pub fn add_calendar_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Whole days between start and target, clamped to a minimum of 1
pub fn eta_days(start: NaiveDate, target: NaiveDate) -> i64 {
    (target - start).num_days().max(1)
}

/// Resolve the canonical target date for a time mode
pub fn resolve_target_date(start: NaiveDate, mode: TimeMode) -> NaiveDate {
    match mode {
        TimeMode::Explicit { target_date } => target_date,
        TimeMode::MonthsFromStart { months } => add_calendar_months(start, months),
    }
}

/// Pure conversion of the aggregate into a [`PlanRequest`]
pub fn build(aggregate: &FormAggregate) -> PlanRequest {
    debug!(title = %aggregate.title, "build: called");

    let start = aggregate.start_date;
    let target = resolve_target_date(start, aggregate.time_mode);
    let eta = eta_days(start, target);
    debug!(%start, %target, eta, "build: timeframe resolved");

    let title = if aggregate.title.trim().is_empty() {
        debug!("build: empty title, defaulting");
        UNTITLED.to_string()
    } else {
        aggregate.title.trim().to_string()
    };

    let insights = serde_json::to_value(&aggregate.insights).unwrap_or_else(|_| serde_json::json!({}));
    let category_details = aggregate
        .category_details
        .as_ref()
        .and_then(|d| serde_json::to_value(d).ok())
        .unwrap_or_else(|| serde_json::json!({}));

    PlanRequest {
        title,
        category: aggregate.category,
        description: aggregate.description.clone(),
        motivation: aggregate.motivation.clone(),
        priority: aggregate.priority,
        time_mode: aggregate.time_mode,
        start_date: start,
        target_date: target,
        eta_days: eta,
        num_phases: aggregate.num_phases,
        context: PlanContext {
            constraints: aggregate.insights.constraints.as_slice().to_vec(),
            cadence: aggregate.insights.cadence.clone(),
            environment: aggregate.insights.environment.clone(),
            outcome: aggregate.insights.outcome_style.clone(),
            notes: aggregate.additional_info.clone(),
            insights,
            category_details,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryDetails;
    use chrono::{Datelike, Days};
    use proptest::prelude::*;

    /// Last day of the month containing `date`
    fn month_end(date: NaiveDate) -> NaiveDate {
        let next = add_calendar_months(date.with_day(1).expect("day 1 always valid"), 1);
        next - Days::new(1)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_jan_31() {
        assert_eq!(add_calendar_months(ymd(2025, 1, 31), 1), ymd(2025, 2, 28));
        // Leap year
        assert_eq!(add_calendar_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
    }

    #[test]
    fn test_add_months_plain() {
        assert_eq!(add_calendar_months(ymd(2025, 3, 15), 2), ymd(2025, 5, 15));
        assert_eq!(add_calendar_months(ymd(2025, 11, 30), 3), ymd(2026, 2, 28));
    }

    #[test]
    fn test_eta_days_minimum_one() {
        let day = ymd(2025, 1, 1);
        assert_eq!(eta_days(day, day), 1);
        assert_eq!(eta_days(day, ymd(2025, 1, 4)), 3);
    }

    #[test]
    fn test_build_defaults_title() {
        let aggregate = FormAggregate {
            title: "   ".to_string(),
            ..Default::default()
        };
        let request = build(&aggregate);
        assert_eq!(request.title, "Untitled Goal");
    }

    #[test]
    fn test_build_resolves_relative_mode() {
        let aggregate = FormAggregate {
            title: "Pass TOEFL".to_string(),
            start_date: ymd(2025, 1, 31),
            time_mode: TimeMode::MonthsFromStart { months: 1 },
            ..Default::default()
        };
        let request = build(&aggregate);
        assert_eq!(request.target_date, ymd(2025, 2, 28));
        assert_eq!(request.eta_days, 28);
    }

    #[test]
    fn test_context_maps_never_null() {
        let aggregate = FormAggregate::default();
        let request = build(&aggregate);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["context"]["insights"].is_object());
        assert!(json["context"]["category_details"].is_object());
        assert!(json["context"]["constraints"].is_array());
    }

    #[test]
    fn test_context_carries_details() {
        let aggregate = FormAggregate {
            title: "Run a 10k".to_string(),
            category: Some(Category::Habits),
            category_details: Some(CategoryDetails::default_for(Category::Habits)),
            ..Default::default()
        };
        let json = serde_json::to_value(build(&aggregate)).unwrap();
        assert_eq!(json["context"]["category_details"]["category"], "habits");
        assert_eq!(json["category"], "habits");
    }

    #[test]
    fn test_wire_date_format() {
        let aggregate = FormAggregate {
            title: "Pass TOEFL".to_string(),
            start_date: ymd(2025, 1, 1),
            time_mode: TimeMode::Explicit {
                target_date: ymd(2025, 1, 4),
            },
            ..Default::default()
        };
        let json = serde_json::to_value(build(&aggregate)).unwrap();
        assert_eq!(json["start_date"], "2025-01-01");
        assert_eq!(json["target_date"], "2025-01-04");
    }

    proptest! {
        #[test]
        fn prop_eta_at_least_one(offset in 0i64..3650, days_apart in 0i64..3650) {
            let start = ymd(2020, 1, 1) + Days::new(offset as u64);
            let target = start + Days::new(days_apart as u64);
            let eta = eta_days(start, target);
            prop_assert!(eta >= 1);
            if days_apart > 0 {
                prop_assert_eq!(eta, days_apart);
            }
        }

        #[test]
        fn prop_month_end_clamping(offset in 0i64..3650, months in 1u32..24) {
            // For every month-end date, adding months either keeps the same
            // day-of-month or clamps to the target month's end; it never
            // overflows into the following month.
            let base = month_end(ymd(2020, 1, 1) + Days::new(offset as u64));
            let result = add_calendar_months(base, months);
            prop_assert!(result.day() == base.day() || result == month_end(result));
            prop_assert!(result > base);
        }
    }
}
