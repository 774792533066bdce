//! `gl slice`: plan and run ready slices

use colored::Colorize;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::fs::{Config, ProjectDir, Snapshot};
use crate::models::constants::slice_prompt;
use crate::models::ExecutionContext;
use crate::orchestrator::terminal::tmux::shell_command;
use crate::orchestrator::{
    self, HeadlessLauncher, Launcher, MuxLauncher, Tmux, WatchConfig, Watcher,
};
use crate::plan::{self, Decision, DryRunProjection, Mode, Plan, PlanInput, SliceRequest, WatchPlan};
use crate::process::Assistant;

/// Collaborators `gl slice` talks to outside the project directory.
#[derive(Debug, Clone)]
pub struct SliceEnv {
    pub context: ExecutionContext,
    pub assistant: Assistant,
    pub tmux: Tmux,
}

impl SliceEnv {
    /// Host context from the environment, binaries from `PATH`.
    pub fn detect() -> Self {
        Self {
            context: ExecutionContext::detect(),
            assistant: Assistant::new(),
            tmux: Tmux::new(),
        }
    }
}

/// Plan one invocation and carry it out.
pub fn execute(
    root: &Path,
    request: &SliceRequest,
    env: &SliceEnv,
    out: &mut dyn Write,
) -> Result<()> {
    let project = ProjectDir::new(root);
    project.require()?;

    let config = Config::load(&project.config_path());
    let snapshot = Snapshot::load(&project)?;
    let report = plan::partition(&snapshot.slices, &snapshot.graph);
    let project_name = project.basename();

    let decision = plan::plan(&PlanInput {
        request,
        context: env.context,
        config: &config,
        mux_available: env.tmux.is_available(),
        project_name: &project_name,
        snapshot: &snapshot,
        report: &report,
    })?;

    match decision {
        Decision::Once(plan) => run_once(&plan, &project, &snapshot, env, out),
        Decision::Watch(watch) => run_watch(watch, &project, snapshot, &config, env, out),
    }
}

fn run_once(
    plan: &Plan,
    project: &ProjectDir,
    snapshot: &Snapshot,
    env: &SliceEnv,
    out: &mut dyn Write,
) -> Result<()> {
    match plan.mode {
        Mode::DryRunSummary => {
            if let Some(projection) = &plan.projection {
                render_dry_run(projection, out)?;
            }
            Ok(())
        }
        Mode::InsideHost => render_inside_host(plan, snapshot, out),
        Mode::Idle => {
            warn_graph_missing(plan.graph_missing, out)?;
            render_idle(plan, out)
        }
        Mode::SingleHeadless | Mode::Sequential | Mode::ParallelMux => {
            warn_graph_missing(plan.graph_missing, out)?;
            orchestrator::execute(plan, &env.assistant, &env.tmux, project.project_root(), out)
        }
    }
}

fn run_watch(
    watch: WatchPlan,
    project: &ProjectDir,
    snapshot: Snapshot,
    config: &Config,
    env: &SliceEnv,
    out: &mut dyn Write,
) -> Result<()> {
    warn_graph_missing(watch.plan.graph_missing, out)?;

    let watch_config = WatchConfig {
        cap: watch.cap,
        interval: watch.interval,
        assistant_flags: config.assistant_flags.clone(),
    };
    let shutdown = shutdown_flag();

    match (watch.plan.mode, watch.plan.session_name.as_deref()) {
        (Mode::ParallelMux, Some(session)) => {
            let launcher = MuxLauncher::new(env.tmux.clone(), session, project.project_root());
            watch_with(launcher, project, snapshot, watch_config, shutdown, out)
        }
        _ => {
            let launcher = HeadlessLauncher::new(env.assistant.clone(), project.project_root());
            watch_with(launcher, project, snapshot, watch_config, shutdown, out)
        }
    }
}

fn watch_with<L: Launcher>(
    launcher: L,
    project: &ProjectDir,
    snapshot: Snapshot,
    config: WatchConfig,
    shutdown: Arc<AtomicBool>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut watcher = Watcher::new(project, launcher, config, shutdown);
    let outcome = watcher.run(snapshot, out)?;
    tracing::debug!(?outcome, "watch loop returned");
    Ok(())
}

/// Flag set by Ctrl-C. Installing the handler twice in one process only warns.
fn shutdown_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }
    flag
}

fn warn_graph_missing(graph_missing: bool, out: &mut dyn Write) -> Result<()> {
    if graph_missing {
        writeln!(
            out,
            "{} GRAPH.json missing; dependency info unavailable, every pending slice counts as ready",
            "warn:".yellow().bold()
        )?;
    }
    Ok(())
}

fn render_inside_host(plan: &Plan, snapshot: &Snapshot, out: &mut dyn Write) -> Result<()> {
    warn_graph_missing(plan.graph_missing, out)?;
    let Some(id) = plan.targets.first() else {
        return Ok(());
    };

    match snapshot.graph.name(id) {
        Some(name) => writeln!(out, "slice: {id} — {name}")?,
        None => writeln!(out, "slice: {id}")?,
    }
    writeln!(out, "run: {}", slice_prompt(id))?;

    if let Some(hint) = &plan.hint {
        writeln!(out, "{} {hint}", "hint:".cyan())?;
    }
    for note in &plan.notes {
        writeln!(out, "{} {note}", "note:".cyan())?;
    }
    Ok(())
}

fn render_idle(plan: &Plan, out: &mut dyn Write) -> Result<()> {
    let report = &plan.report;
    let reason = plan.reason.as_deref().unwrap_or_default();
    writeln!(out, "No ready slices: {reason}")?;

    if report.running.is_empty() && report.blocked.is_empty() && report.other.is_empty() {
        writeln!(out, "{} All slices complete.", "✓".green().bold())?;
    } else if !report.running.is_empty() {
        writeln!(out, "  running: {}", report.running.join(", "))?;
    }
    Ok(())
}

fn render_dry_run(projection: &DryRunProjection, out: &mut dyn Write) -> Result<()> {
    let report = &projection.report;

    writeln!(out, "{}", "dry-run: no sessions will be started".bold())?;
    warn_graph_missing(projection.graph_missing, out)?;

    writeln!(out, "{} ({})", "Ready".bold(), report.ready.len())?;
    for id in &report.ready {
        writeln!(out, "  {id}")?;
    }

    writeln!(out, "{} ({})", "Running".bold(), projection.running.len())?;
    for running in &projection.running {
        if running.step.is_empty() {
            writeln!(out, "  {}", running.id)?;
        } else {
            writeln!(out, "  {} ({})", running.id, running.step)?;
        }
    }

    writeln!(out, "{} ({})", "Blocked".bold(), report.blocked.len())?;
    for blocked in &report.blocked {
        writeln!(
            out,
            "  {} → waits on {}",
            blocked.id,
            blocked.waiting_on.join(", ")
        )?;
    }

    let mut mode_line = format!("{} {}", "Mode:".bold(), projection.mode);
    if let Some(session) = &projection.session_name {
        mode_line.push_str(&format!(" (tmux session {session})"));
    }
    if let Some(reason) = &projection.reason {
        mode_line.push_str(&format!(" ({reason})"));
    }
    writeln!(out, "{mode_line}")?;

    writeln!(
        out,
        "{} ({}, max {})",
        "Would launch".bold(),
        projection.would_launch.len(),
        projection.cap
    )?;
    for (id, argv) in &projection.would_launch {
        writeln!(out, "  {id}: {}", shell_command(argv))?;
    }

    if projection.watch_requested {
        writeln!(out, "{} --watch has no effect together with --dry-run", "note:".cyan())?;
    }
    Ok(())
}
