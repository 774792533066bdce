//! Watch loop against files on disk, with a launcher that edits slice files

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use greenlight::error::Result;
use greenlight::fs::{ProjectDir, Snapshot};
use greenlight::orchestrator::{Launcher, WatchConfig, WatchOutcome, Watcher};

use super::helpers::{project, shop, write_slice};

/// Marks a slice complete as soon as it is started.
struct InstantLauncher {
    root: PathBuf,
    launched: Vec<String>,
}

impl Launcher for InstantLauncher {
    fn launch(&mut self, id: &str, argv: &[String]) -> Result<()> {
        assert_eq!(argv[0], "claude");
        assert_eq!(argv[2], format!("/gl:slice {id}"));
        write_slice(&self.root, id, "complete", "done");
        self.launched.push(id.to_string());
        Ok(())
    }
}

fn watch(root: &std::path::Path, cap: usize) -> (WatchOutcome, Vec<String>, String) {
    colored::control::set_override(false);
    let dir = ProjectDir::new(root);
    let snapshot = Snapshot::load(&dir).unwrap();
    let launcher = InstantLauncher {
        root: root.to_path_buf(),
        launched: Vec::new(),
    };
    let config = WatchConfig {
        cap,
        interval: Duration::from_millis(5),
        assistant_flags: Vec::new(),
    };
    let mut watcher = Watcher::new(&dir, launcher, config, Arc::new(AtomicBool::new(false)));
    let mut out = Vec::new();
    let outcome = watcher.run(snapshot, &mut out).unwrap();
    let launched = watcher.launcher().launched.clone();
    (outcome, launched, String::from_utf8(out).unwrap())
}

#[test]
fn test_all_complete_exits_without_launching() {
    let tmp = project(
        &[("S-01", "complete", "done"), ("S-02", "complete", "done")],
        Some(r#"{"slices": {"S-01": {}, "S-02": {"depends_on": ["S-01"]}}}"#),
    );
    let (outcome, launched, output) = watch(tmp.path(), 4);

    assert_eq!(outcome, WatchOutcome::NothingToDo { complete: 2, blocked: 0 });
    assert!(launched.is_empty());
    assert!(output.contains("nothing to do"));
}

#[test]
fn test_circular_dependencies_exit() {
    let tmp = project(
        &[("S-01", "pending", ""), ("S-02", "pending", "")],
        Some(r#"{"slices": {"S-01": {"depends_on": ["S-02"]}, "S-02": {"depends_on": ["S-01"]}}}"#),
    );
    let (outcome, launched, _) = watch(tmp.path(), 4);

    assert_eq!(outcome, WatchOutcome::NothingToDo { complete: 0, blocked: 2 });
    assert!(launched.is_empty());
}

#[test]
fn test_runs_waves_until_done() {
    let tmp = shop();
    // S-02 finishes on its own before the loop starts.
    write_slice(tmp.path(), "S-02", "complete", "done");

    let (outcome, launched, _) = watch(tmp.path(), 2);

    assert_eq!(launched, ["S-03", "S-04", "S-05"]);
    assert_eq!(outcome, WatchOutcome::NothingToDo { complete: 5, blocked: 0 });
}
