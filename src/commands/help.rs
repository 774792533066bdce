//! `gl help`: grouped command listing and a one-line project summary

use colored::Colorize;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::fs::{ProjectDir, Snapshot};
use crate::models::constants::VERSION;
use crate::models::SliceStatus;
use crate::plan::partition;

const GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "Project lifecycle",
        &[
            ("init", "Initialise a new greenlight project"),
            ("design", "Run the design phase for a feature"),
            ("roadmap", "View the project roadmap"),
        ],
    ),
    ("Building", &[("slice", "Run ready slices end-to-end")]),
    (
        "State & progress",
        &[
            ("status", "Show current project status"),
            ("changelog", "View the changelog"),
        ],
    ),
    (
        "Admin",
        &[
            ("install", "Install greenlight files"),
            ("uninstall", "Remove greenlight files"),
            ("check", "Verify installation"),
            ("version", "Show version information"),
            ("help", "Show this help"),
        ],
    ),
];

/// Always succeeds; project state is best effort.
pub fn execute(root: &Path, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{} {VERSION}\n", "gl".bold())?;
    writeln!(out, "Usage: gl <command> [flags]\n")?;

    for (group, commands) in GROUPS {
        writeln!(out, "{}:", group.bold())?;
        for (name, about) in *commands {
            writeln!(out, "  {name:<11} {about}")?;
        }
        writeln!(out)?;
    }

    let project = ProjectDir::new(root);
    if !project.exists() {
        writeln!(out, "Run 'gl init' to start a new project.")?;
        return Ok(());
    }

    let (total, complete, ready) = project_counts(&project);
    writeln!(
        out,
        "Current project: {total} slices, {complete} complete, {ready} ready"
    )?;
    Ok(())
}

/// `(total, complete, ready)`; zero on unreadable state, no ready count
/// without a readable graph.
fn project_counts(project: &ProjectDir) -> (usize, usize, usize) {
    let Ok(snapshot) = Snapshot::load_lenient(project) else {
        return (0, 0, 0);
    };
    let complete = snapshot
        .slices
        .iter()
        .filter(|s| s.status == SliceStatus::Complete)
        .count();
    let ready = if snapshot.graph_missing {
        0
    } else {
        partition(&snapshot.slices, &snapshot.graph).ready.len()
    };
    (snapshot.slices.len(), complete, ready)
}
