//! Planning against real project directories

use std::path::{Path, PathBuf};

use greenlight::fs::{Config, ProjectDir, Snapshot};
use greenlight::models::ExecutionContext;
use greenlight::plan::{partition, plan, Decision, Mode, PlanInput, SliceRequest};
use greenlight::process::Assistant;

use super::helpers::{project, shop};

fn decide(root: &Path, request: SliceRequest, mux_available: bool) -> Decision {
    let dir = ProjectDir::new(root);
    let config = Config::load(&dir.config_path());
    let snapshot = Snapshot::load(&dir).unwrap();
    let report = partition(&snapshot.slices, &snapshot.graph);
    plan(&PlanInput {
        request: &request,
        context: ExecutionContext::shell(),
        config: &config,
        mux_available,
        project_name: "shop",
        snapshot: &snapshot,
        report: &report,
    })
    .unwrap()
}

#[test]
fn test_shop_partition() {
    let tmp = shop();
    let snapshot = Snapshot::load(&ProjectDir::new(tmp.path())).unwrap();
    let report = partition(&snapshot.slices, &snapshot.graph);

    assert_eq!(report.complete, ["S-01"]);
    assert_eq!(report.running, ["S-02"]);
    assert_eq!(report.ready, ["S-03", "S-04"]);
    assert_eq!(report.blocked.len(), 1);
    assert_eq!(report.blocked[0].id, "S-05");
    assert_eq!(report.blocked[0].waiting_on, ["S-03"]);
}

#[test]
fn test_parallel_plan_uses_project_session() {
    let tmp = shop();
    let decision = decide(tmp.path(), SliceRequest::default(), true);
    let plan = decision.plan();

    assert_eq!(plan.mode, Mode::ParallelMux);
    assert_eq!(plan.targets, ["S-03", "S-04"]);
    assert_eq!(plan.session_name.as_deref(), Some("gl-shop"));
}

#[test]
fn test_wave_orders_ready_slices() {
    let tmp = project(
        &[("S-A", "pending", ""), ("S-B", "pending", "")],
        Some(r#"{"slices": {"S-A": {"wave": 2}, "S-B": {"wave": 1}}}"#),
    );
    let request = SliceRequest {
        dry_run: true,
        max: 1,
        ..Default::default()
    };
    let decision = decide(tmp.path(), request, false);
    let projection = decision.plan().projection.clone().unwrap();
    assert_eq!(projection.report.ready, ["S-B", "S-A"]);
    assert_eq!(projection.would_launch.len(), 1);
    assert_eq!(projection.would_launch[0].0, "S-B");
}

#[test]
fn test_config_flags_never_carry_dangerous_flag() {
    let tmp = shop();
    std::fs::write(
        tmp.path().join(".greenlight/config.json"),
        r#"{"parallel": {"assistant_flags": ["--dangerously-skip-permissions", "--verbose"], "mux_session_prefix": "team"}}"#,
    )
    .unwrap();

    let decision = decide(tmp.path(), SliceRequest::default(), true);
    let plan = decision.plan();
    assert_eq!(plan.session_name.as_deref(), Some("team-shop"));
    for argv in &plan.commands {
        assert!(!argv.iter().any(|a| a == "--dangerously-skip-permissions"));
        assert_eq!(argv.last().map(String::as_str), Some("--verbose"));
    }
}

#[test]
fn test_interactive_build_drops_dangerous_flag() {
    fn found(name: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/opt/bin").join(name))
    }

    let assistant = Assistant::with_lookup(found);
    let flags = vec![
        "--dangerously-skip-permissions".to_string(),
        "--model".to_string(),
        "--dangerously-skip-permissions".to_string(),
    ];
    let cmd = assistant
        .build_interactive("/gl:init", &flags, Path::new("."))
        .unwrap();
    let args: Vec<_> = cmd.get_args().collect();
    assert_eq!(args, ["-p", "/gl:init", "--model"]);
}

#[test]
fn test_missing_graph_makes_every_pending_slice_ready() {
    let tmp = project(&[("S-01", "pending", ""), ("S-02", "pending", "")], None);
    let decision = decide(tmp.path(), SliceRequest::default(), true);
    let plan = decision.plan();
    assert!(plan.graph_missing);
    assert_eq!(plan.targets, ["S-01", "S-02"]);
}
