//! Launch planner: turns flags and a readiness report into one [`Decision`]
//!
//! Precedence, first match wins:
//! 1. unknown explicit slice id is an error
//! 2. `--dry-run` projects and never spawns (beats `--watch`)
//! 3. inside the assistant host, print an instruction (never watch)
//! 4. nothing ready and no id: idle summary
//! 5. otherwise choose single, sequential or parallel targets
//!
//! The project-directory check happens before a snapshot can exist, in the
//! command that calls [`plan`].

use crate::error::{GlError, Result};
use crate::fs::{Config, Snapshot};
use crate::models::constants::{slice_prompt, ASSISTANT_BINARY};
use crate::models::ExecutionContext;
use crate::process::strip_dangerous_flags;

use super::readiness::ReadyReport;
use super::types::{Decision, DryRunProjection, Mode, Plan, RunningSlice, SliceRequest, WatchPlan};

/// Everything the planner looks at. Borrowed; the planner does no I/O.
pub struct PlanInput<'a> {
    pub request: &'a SliceRequest,
    pub context: ExecutionContext,
    pub config: &'a Config,
    pub mux_available: bool,
    pub project_name: &'a str,
    pub snapshot: &'a Snapshot,
    pub report: &'a ReadyReport,
}

/// Targets and mode for a real (non dry-run) launch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    mode: Mode,
    targets: Vec<String>,
    reason: Option<String>,
    hint: Option<String>,
}

/// Argument vector that runs one slice headless.
pub fn slice_command(id: &str, flags: &[String]) -> Vec<String> {
    let mut argv = vec![
        ASSISTANT_BINARY.to_string(),
        "-p".to_string(),
        slice_prompt(id),
    ];
    argv.extend(strip_dangerous_flags(flags));
    argv
}

/// Clamp the requested cap to at least one slot.
pub fn effective_cap(max: usize) -> usize {
    max.max(1)
}

/// Decide what `gl slice` does for this input.
pub fn plan(input: &PlanInput<'_>) -> Result<Decision> {
    let request = input.request;
    let report = input.report;
    let cap = effective_cap(request.max);

    if let Some(id) = &request.id {
        if input.snapshot.graph_missing || !input.snapshot.graph.contains(id) {
            return Err(GlError::UnknownSliceId(id.clone()));
        }
    }

    if request.dry_run {
        return Ok(Decision::Once(dry_run(input, cap)));
    }

    let graph_missing = input.snapshot.graph_missing;

    if input.context.inside_host {
        let target = match &request.id {
            Some(id) => Some(id.clone()),
            None => report.ready.first().cloned(),
        };
        if let Some(target) = target {
            let mut plan = Plan::new(Mode::InsideHost, report.clone(), graph_missing);
            plan.commands = vec![slice_command(&target, &input.config.assistant_flags)];
            plan.targets = vec![target];
            if request.id.is_none() && report.ready.len() > 1 {
                plan.hint = Some(remaining_hint(report.ready.len() - 1));
            }
            if request.watch {
                plan.notes
                    .push("watch mode needs a shell; running a single slice instead".to_string());
            }
            return Ok(Decision::Once(plan));
        }
    }

    if request.id.is_none() && report.ready.is_empty() {
        let mut plan = Plan::new(Mode::Idle, report.clone(), graph_missing);
        plan.reason = Some(format!(
            "{} ready, {} running, {} blocked",
            report.ready.len(),
            report.running.len(),
            report.blocked.len()
        ));
        return Ok(Decision::Once(plan));
    }

    let selection = select(request, report, input.mux_available, cap);
    let mut plan = Plan::new(selection.mode, report.clone(), graph_missing);
    plan.commands = selection
        .targets
        .iter()
        .map(|id| slice_command(id, &input.config.assistant_flags))
        .collect();
    plan.targets = selection.targets;
    plan.reason = selection.reason;
    plan.hint = selection.hint;
    if plan.mode == Mode::ParallelMux {
        plan.session_name = Some(input.config.session_name(input.project_name));
    }

    tracing::debug!(mode = %plan.mode, targets = ?plan.targets, "planned slice launch");

    if request.watch && matches!(plan.mode, Mode::ParallelMux | Mode::Sequential) {
        let watch_cap = if plan.mode == Mode::ParallelMux { cap } else { 1 };
        return Ok(Decision::Watch(WatchPlan {
            plan,
            cap: watch_cap,
            interval: input.config.watch_interval(),
        }));
    }

    Ok(Decision::Once(plan))
}

fn select(request: &SliceRequest, report: &ReadyReport, mux_available: bool, cap: usize) -> Selection {
    if let Some(id) = &request.id {
        return Selection {
            mode: Mode::SingleHeadless,
            targets: vec![id.clone()],
            reason: None,
            hint: None,
        };
    }

    let ready = &report.ready;
    let first_only = |mode: Mode, reason: Option<&str>| Selection {
        mode,
        targets: ready.iter().take(1).cloned().collect(),
        reason: reason.map(String::from),
        hint: (ready.len() > 1).then(|| remaining_hint(ready.len() - 1)),
    };

    if request.sequential {
        return first_only(Mode::Sequential, Some("sequential mode requested"));
    }
    if !mux_available {
        return if ready.len() >= 2 {
            first_only(
                Mode::Sequential,
                Some("tmux not available, using sequential mode"),
            )
        } else {
            first_only(Mode::SingleHeadless, None)
        };
    }
    if cap == 1 {
        return first_only(Mode::Sequential, Some("--max 1 runs one slice at a time"));
    }

    let take = ready.len().min(cap);
    Selection {
        mode: Mode::ParallelMux,
        targets: ready[..take].to_vec(),
        reason: None,
        hint: (ready.len() > take).then(|| remaining_hint(ready.len() - take)),
    }
}

fn dry_run(input: &PlanInput<'_>, cap: usize) -> Plan {
    let request = input.request;
    let report = input.report;

    let would_launch_ids: Vec<String> = match &request.id {
        Some(id) => vec![id.clone()],
        None => report.ready.iter().take(cap).cloned().collect(),
    };
    let would_launch: Vec<(String, Vec<String>)> = would_launch_ids
        .iter()
        .map(|id| (id.clone(), slice_command(id, &input.config.assistant_flags)))
        .collect();

    let (mode, reason) = if input.context.inside_host {
        (Mode::InsideHost, Some("running inside the assistant host".to_string()))
    } else if request.id.is_none() && report.ready.is_empty() {
        (Mode::Idle, None)
    } else {
        let selection = select(request, report, input.mux_available, cap);
        (selection.mode, selection.reason)
    };

    let running = report
        .running
        .iter()
        .map(|id| RunningSlice {
            id: id.clone(),
            step: input
                .snapshot
                .slice(id)
                .map(|s| s.step.clone())
                .unwrap_or_default(),
        })
        .collect();

    let projection = DryRunProjection {
        report: report.clone(),
        running,
        mode,
        reason,
        session_name: (mode == Mode::ParallelMux)
            .then(|| input.config.session_name(input.project_name)),
        would_launch: would_launch.clone(),
        cap,
        graph_missing: input.snapshot.graph_missing,
        watch_requested: request.watch,
    };

    let mut plan = Plan::new(Mode::DryRunSummary, report.clone(), input.snapshot.graph_missing);
    plan.targets = would_launch.iter().map(|(id, _)| id.clone()).collect();
    plan.commands = would_launch.into_iter().map(|(_, argv)| argv).collect();
    plan.projection = Some(projection);
    plan
}

fn remaining_hint(remaining: usize) -> String {
    format!("{remaining} more ready slice(s) available; run again or raise --max to start them")
}
