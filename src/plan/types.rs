use std::fmt;
use std::time::Duration;

use super::readiness::ReadyReport;

/// How a plan runs its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print an in-band instruction for the assistant host. Never spawns.
    InsideHost,
    /// Run one slice headless in this terminal.
    SingleHeadless,
    /// One tmux window per target, then attach.
    ParallelMux,
    /// One slice now; the rest on later invocations.
    Sequential,
    /// Print what would happen. Never spawns.
    DryRunSummary,
    /// Nothing is ready; print a summary and exit 0.
    Idle,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::InsideHost => "inside-host",
            Mode::SingleHeadless => "single-headless",
            Mode::ParallelMux => "parallel-mux",
            Mode::Sequential => "sequential",
            Mode::DryRunSummary => "dry-run-summary",
            Mode::Idle => "idle",
        }
    }

    /// Modes that start assistant processes.
    pub fn spawns(&self) -> bool {
        matches!(
            self,
            Mode::SingleHeadless | Mode::ParallelMux | Mode::Sequential
        )
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags of `gl slice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceRequest {
    pub id: Option<String>,
    pub dry_run: bool,
    pub watch: bool,
    pub sequential: bool,
    /// Concurrency cap as given; clamped to at least 1 by the planner.
    pub max: usize,
}

impl Default for SliceRequest {
    fn default() -> Self {
        Self {
            id: None,
            dry_run: false,
            watch: false,
            sequential: false,
            max: crate::models::constants::DEFAULT_MAX_PARALLEL,
        }
    }
}

/// A running slice and the step it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningSlice {
    pub id: String,
    pub step: String,
}

/// What a dry run reports instead of launching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunProjection {
    pub report: ReadyReport,
    pub running: Vec<RunningSlice>,
    /// Mode a real invocation with the same flags would use.
    pub mode: Mode,
    pub reason: Option<String>,
    pub session_name: Option<String>,
    /// Targets with their argument vectors, at most `min(ready, cap)`.
    pub would_launch: Vec<(String, Vec<String>)>,
    pub cap: usize,
    pub graph_missing: bool,
    /// The dry run also asked for watch mode.
    pub watch_requested: bool,
}

/// The outcome of planning one `gl slice` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub mode: Mode,
    /// Present exactly when `mode` is [`Mode::ParallelMux`].
    pub session_name: Option<String>,
    pub targets: Vec<String>,
    /// One argument vector per target, starting with the assistant binary.
    pub commands: Vec<Vec<String>>,
    pub projection: Option<DryRunProjection>,
    /// Why this mode was chosen, when it was not the obvious one.
    pub reason: Option<String>,
    /// Ready slices left for a later run.
    pub hint: Option<String>,
    pub notes: Vec<String>,
    pub report: ReadyReport,
    pub graph_missing: bool,
}

impl Plan {
    pub(crate) fn new(mode: Mode, report: ReadyReport, graph_missing: bool) -> Self {
        Self {
            mode,
            session_name: None,
            targets: Vec::new(),
            commands: Vec::new(),
            projection: None,
            reason: None,
            hint: None,
            notes: Vec::new(),
            report,
            graph_missing,
        }
    }
}

/// A plan the watch loop keeps refilling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPlan {
    pub plan: Plan,
    /// Maximum slices in flight at once.
    pub cap: usize,
    pub interval: Duration,
}

/// Exactly one of these comes out of the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Once(Plan),
    Watch(WatchPlan),
}

impl Decision {
    pub fn plan(&self) -> &Plan {
        match self {
            Decision::Once(plan) => plan,
            Decision::Watch(watch) => &watch.plan,
        }
    }
}
