//! Domain types for goalsmith
//!
//! Categories and their typed detail schemas, the generator's phase/subgoal
//! output shape, and the persisted goal/subgoal records.

mod category;
mod goal;
mod phase;
mod priority;

pub use category::{Category, CategoryDetails};
pub use goal::{GoalId, NewGoal, SubgoalRow, SubgoalStatus};
pub use phase::{Phase, SubgoalDraft};
pub use priority::Priority;
