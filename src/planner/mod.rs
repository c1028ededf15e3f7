//! Plan generation and materialization
//!
//! The back half of the pipeline: build the request payload from the
//! completed aggregate, obtain a phase tree from the external generator,
//! then expand it into dated, persisted rows.

mod client;
mod materializer;
mod request;

pub use client::{HttpPlanGenerator, PlanGenerationError, PlanGenerator};
pub use materializer::{MaterializedGoal, PlanMaterializer};
pub use request::{PlanContext, PlanRequest, add_calendar_months, build, eta_days, resolve_target_date};
