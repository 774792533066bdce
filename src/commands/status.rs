//! `gl status`: progress report for the current project

use colored::Colorize;
use std::io::Write;
use std::path::Path;

use crate::error::{GlError, Result, StateError};
use crate::fs::{ProjectDir, Snapshot};
use crate::models::SliceStatus;
use crate::plan::{partition, BlockedSlice};

const PROGRESS_BAR_WIDTH: usize = 20;

/// Show project status.
///
/// `compact` prints a single uncolored line for terminal status bars and
/// never fails: unreadable state prints `? slices | ? running`.
pub fn execute(root: &Path, compact: bool, out: &mut dyn Write) -> Result<()> {
    let project = ProjectDir::new(root);
    let snapshot = match Snapshot::load_lenient(&project) {
        Ok(snapshot) => snapshot,
        Err(e) if compact => {
            tracing::debug!(error = %e, "compact status degraded");
            writeln!(out, "? slices | ? running")?;
            return Ok(());
        }
        Err(e) => return Err(load_error(e)),
    };

    let stats = Stats::collect(&snapshot);
    if compact {
        writeln!(
            out,
            "{}/{} done | {} running",
            stats.complete,
            stats.total,
            stats.running.len()
        )?;
        return Ok(());
    }

    write_full(&snapshot, &stats, out)
}

fn load_error(e: StateError) -> GlError {
    match e {
        StateError::DirNotFound(_) => GlError::Missing(
            ".greenlight/ directory not found. Run 'gl init' to set up this project.".to_string(),
        ),
        StateError::NoSliceFiles(_) => GlError::Missing(
            "no slice files found. Run 'gl init' to populate the slices directory.".to_string(),
        ),
        other => other.into(),
    }
}

/// Counts over every slice file.
#[derive(Debug, Default)]
struct Stats {
    total: usize,
    complete: usize,
    tests: u64,
    security_tests: u64,
    /// `(id, step)` of in-progress slices.
    running: Vec<(String, String)>,
}

impl Stats {
    fn collect(snapshot: &Snapshot) -> Self {
        let mut stats = Stats {
            total: snapshot.slices.len(),
            ..Default::default()
        };
        for slice in &snapshot.slices {
            stats.tests += u64::from(slice.tests);
            stats.security_tests += u64::from(slice.security_tests);
            match slice.status {
                SliceStatus::Complete => stats.complete += 1,
                SliceStatus::InProgress => {
                    stats.running.push((slice.id.clone(), slice.step.clone()));
                }
                _ => {}
            }
        }
        stats
    }
}

fn write_full(snapshot: &Snapshot, stats: &Stats, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} {} {}/{}",
        "Progress:".bold(),
        progress_bar(stats.complete, stats.total),
        stats.complete,
        stats.total
    )?;

    let running: Vec<String> = stats
        .running
        .iter()
        .map(|(id, step)| format!("{id} ({step})"))
        .collect();
    writeln!(out, "{}  {}", "Running:".bold(), list_or_dash(&running))?;

    if snapshot.graph_missing {
        writeln!(out, "{}    (dependency info unavailable)", "Ready:".bold())?;
        writeln!(out, "{}  (dependency info unavailable)", "Blocked:".bold())?;
    } else {
        let report = partition(&snapshot.slices, &snapshot.graph);
        writeln!(out, "{}    {}", "Ready:".bold(), list_or_dash(&report.ready))?;
        let blocked: Vec<String> = report.blocked.iter().map(needs).collect();
        writeln!(out, "{}  {}", "Blocked:".bold(), list_or_dash(&blocked))?;
    }

    writeln!(
        out,
        "{}    {} total ({} security)",
        "Tests:".bold(),
        stats.tests,
        stats.security_tests
    )?;

    if snapshot.graph_missing {
        writeln!(
            out,
            "{} GRAPH.json missing or unreadable; dependency info unavailable. Run 'gl init' to generate it.",
            "warn:".yellow().bold()
        )?;
    }
    Ok(())
}

fn needs(blocked: &BlockedSlice) -> String {
    format!("{} (needs {})", blocked.id, blocked.waiting_on.join(", "))
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}

/// `[####................]`, `complete` of `total` filled.
pub(crate) fn progress_bar(complete: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (complete * PROGRESS_BAR_WIDTH / total).min(PROGRESS_BAR_WIDTH)
    };
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}
