//! Watch mode: keep launch slots filled until no slice can make progress

use chrono::Local;
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::fs::{ProjectDir, Snapshot};
use crate::models::SliceStatus;
use crate::plan::{partition, slice_command, ReadyReport};

use super::launcher::Launcher;

/// Longest single sleep between shutdown-flag checks.
const SHUTDOWN_CHECK: Duration = Duration::from_millis(100);

/// Why the watch loop returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Nothing ready, nothing running, nothing in flight.
    NothingToDo { complete: usize, blocked: usize },
    /// Shutdown was requested.
    Interrupted,
}

/// Configuration of one watch run.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub cap: usize,
    pub interval: Duration,
    /// Flags appended to every launched assistant.
    pub assistant_flags: Vec<String>,
}

/// Re-reads project state every interval and launches ready slices.
pub struct Watcher<'a, L: Launcher> {
    project: &'a ProjectDir,
    launcher: L,
    config: WatchConfig,
    shutdown: Arc<AtomicBool>,
    /// Every slice this loop has started.
    scheduled: BTreeSet<String>,
    /// Started slices whose session ended without the slice moving on.
    stalled: BTreeSet<String>,
    last_counts: Option<(usize, usize, usize, usize)>,
    described: bool,
}

impl<'a, L: Launcher> Watcher<'a, L> {
    pub fn new(
        project: &'a ProjectDir,
        launcher: L,
        config: WatchConfig,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            project,
            launcher,
            config,
            shutdown,
            scheduled: BTreeSet::new(),
            stalled: BTreeSet::new(),
            last_counts: None,
            described: false,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run until nothing can progress or shutdown is requested.
    ///
    /// `initial` is the snapshot the caller already read; later read
    /// failures are reported and retried on the next tick.
    pub fn run(&mut self, initial: Snapshot, out: &mut dyn Write) -> Result<WatchOutcome> {
        writeln!(
            out,
            "{} Watching {} (max {}, every {}s). Press {} to stop.",
            "→".cyan().bold(),
            self.project.root().display(),
            self.config.cap,
            self.config.interval.as_secs_f64(),
            "Ctrl+C".bold()
        )?;

        let mut pending = Some(initial);

        loop {
            let snapshot = match pending.take() {
                Some(snapshot) => Some(snapshot),
                None => match Snapshot::load(self.project) {
                    Ok(snapshot) => Some(snapshot),
                    Err(e) => {
                        writeln!(out, "{} {e}; retrying next tick", "warn:".yellow().bold())?;
                        None
                    }
                },
            };

            if let Some(snapshot) = snapshot {
                if let Some(outcome) = self.tick(&snapshot, out)? {
                    return Ok(outcome);
                }
            }

            if self.sleep() {
                writeln!(out, "{} interrupted; running sessions keep going", "→".cyan())?;
                return Ok(WatchOutcome::Interrupted);
            }
        }
    }

    /// One evaluation. Returns an outcome when the loop should stop.
    fn tick(&mut self, snapshot: &Snapshot, out: &mut dyn Write) -> Result<Option<WatchOutcome>> {
        let report = partition(&snapshot.slices, &snapshot.graph);
        let status_of = |id: &str| snapshot.slice(id).map(|s| &s.status);

        for id in self.launcher.finished() {
            if awaiting_pickup(status_of(&id)) && self.stalled.insert(id.clone()) {
                writeln!(
                    out,
                    "{} session for {id} exited without updating the slice",
                    "warn:".yellow().bold()
                )?;
            }
        }

        // Launched slices not yet in progress. Only those still pending can
        // make progress on their own; unknown statuses hold a slot but never
        // keep the loop alive.
        let mut awaiting = 0;
        let mut parked = 0;
        for id in self.scheduled.difference(&self.stalled) {
            if report.running.contains(id) {
                continue;
            }
            match status_of(id) {
                Some(SliceStatus::Pending) => awaiting += 1,
                Some(SliceStatus::Other(_)) => parked += 1,
                _ => {}
            }
        }

        let launchable: Vec<String> = report
            .ready
            .iter()
            .filter(|id| !self.scheduled.contains(*id))
            .cloned()
            .collect();

        let busy = report.running.len() + awaiting + parked;
        let free = self.config.cap.saturating_sub(busy);

        tracing::debug!(
            ready = report.ready.len(),
            running = report.running.len(),
            awaiting,
            parked,
            "watch tick"
        );

        let can_launch = !launchable.is_empty() && free > 0;
        if !can_launch && report.running.is_empty() && awaiting == 0 {
            self.print_summary(&report, out)?;
            return Ok(Some(WatchOutcome::NothingToDo {
                complete: report.complete.len(),
                blocked: report.blocked.len(),
            }));
        }

        for id in launchable.into_iter().take(free) {
            let argv = slice_command(&id, &self.config.assistant_flags);
            match self.launcher.launch(&id, &argv) {
                Ok(()) => {
                    writeln!(
                        out,
                        "[{}] {} started {}",
                        Local::now().format("%H:%M:%S"),
                        "✓".green().bold(),
                        id.bold()
                    )?;
                    if !self.described {
                        self.described = true;
                        if let Some(description) = self.launcher.describe() {
                            writeln!(out, "  {}", description.dimmed())?;
                        }
                    }
                }
                Err(e) => {
                    writeln!(out, "{} could not start {id}: {e}", "warn:".yellow().bold())?;
                    self.stalled.insert(id.clone());
                }
            }
            self.scheduled.insert(id);
        }

        self.print_counts(&report, out)?;
        Ok(None)
    }

    fn print_counts(&mut self, report: &ReadyReport, out: &mut dyn Write) -> Result<()> {
        let counts = (
            report.complete.len(),
            report.running.len(),
            report.ready.len(),
            report.blocked.len(),
        );
        if self.last_counts == Some(counts) {
            return Ok(());
        }
        self.last_counts = Some(counts);

        writeln!(
            out,
            "[{}] {} complete | {} running | {} ready | {} blocked",
            Local::now().format("%H:%M:%S"),
            counts.0,
            counts.1,
            counts.2,
            counts.3
        )?;
        Ok(())
    }

    fn print_summary(&self, report: &ReadyReport, out: &mut dyn Write) -> Result<()> {
        let mut line = format!(
            "Watch finished: nothing to do — {} complete, {} blocked",
            report.complete.len(),
            report.blocked.len()
        );
        if !report.other.is_empty() {
            line.push_str(&format!(", {} other", report.other.len()));
        }
        if !self.stalled.is_empty() {
            line.push_str(&format!(", {} stalled", self.stalled.len()));
        }
        writeln!(out, "{}", line.bold())?;

        if report.complete.len() == report.total() {
            writeln!(out, "{} All slices complete.", "✓".green().bold())?;
        } else if report.ready.is_empty() && !report.blocked.is_empty() {
            writeln!(out, "No ready slices: remaining slices are blocked on dependencies.")?;
        }
        Ok(())
    }

    /// Sleep for one interval. Returns true when shutdown was requested.
    fn sleep(&self) -> bool {
        let deadline = Instant::now() + self.config.interval;
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return self.shutdown.load(Ordering::SeqCst);
            }
            std::thread::sleep((deadline - now).min(SHUTDOWN_CHECK));
        }
    }
}

/// Launched but not yet picked up by the assistant.
fn awaiting_pickup(status: Option<&SliceStatus>) -> bool {
    matches!(status, Some(SliceStatus::Pending))
}
