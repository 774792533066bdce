//! Slice planning
//!
//! This module handles:
//! - Partitioning slices into complete / running / ready / blocked
//! - Choosing an execution mode and launch targets for `gl slice`

pub mod planner;
pub mod readiness;
pub mod types;


pub use planner::{effective_cap, plan, slice_command, PlanInput};
pub use readiness::{partition, BlockedSlice, ReadyReport};
pub use types::{Decision, DryRunProjection, Mode, Plan, RunningSlice, SliceRequest, WatchPlan};
