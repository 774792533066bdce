//! The `gl` binary end to end, with `PATH` and host context isolated

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

use super::helpers::shop;

/// `gl` in `dir` with no binaries on PATH and outside the assistant host.
#[allow(deprecated)]
fn gl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gl").unwrap();
    cmd.current_dir(dir)
        .env_remove("CLAUDE_CODE")
        .env_remove("GL_ROOT")
        .env_remove("GL_LOG")
        .env("PATH", "")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn dry_run_needs_no_binaries() {
    let tmp = shop();
    let output = gl(tmp.path())
        .args(["slice", "--dry-run", "--max=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would launch (2, max 2)"))
        .stdout(predicate::str::contains("S-05 → waits on S-03"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap().to_lowercase();
    for word in ["launched", "launching", "polling", "sleeping"] {
        assert!(!text.contains(word), "dry run printed {word}");
    }
}

#[test]
fn dry_run_with_watch_returns() {
    let tmp = shop();
    gl(tmp.path())
        .args(["slice", "--dry-run", "--watch"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Would launch"));
}

#[test]
fn unknown_slice_id_fails() {
    let tmp = shop();
    gl(tmp.path())
        .args(["slice", "INVALID-99"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error: unknown slice ID \"INVALID-99\""));
}

#[test]
fn slice_outside_project_fails() {
    let tmp = TempDir::new().unwrap();
    gl(tmp.path())
        .arg("slice")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error: not a greenlight project"));
}

#[test]
fn slice_without_assistant_fails() {
    let tmp = shop();
    gl(tmp.path())
        .args(["slice", "S-03"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("claude binary not found in PATH"));
}

#[test]
fn inside_host_prints_instruction() {
    let tmp = shop();
    gl(tmp.path())
        .arg("slice")
        .env("CLAUDE_CODE", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("run: /gl:slice S-03"));
}

#[test]
fn root_flag_and_env_select_project() {
    let tmp = shop();
    let elsewhere = TempDir::new().unwrap();
    gl(elsewhere.path())
        .args(["status", "--compact", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("1/5 done | 1 running\n");

    gl(elsewhere.path())
        .args(["status", "--compact"])
        .env("GL_ROOT", tmp.path())
        .assert()
        .success()
        .stdout("1/5 done | 1 running\n");
}

#[test]
fn compact_status_degrades_to_question_marks() {
    let tmp = TempDir::new().unwrap();
    gl(tmp.path())
        .args(["status", "--compact"])
        .assert()
        .success()
        .stdout("? slices | ? running\n");
}

#[test]
fn full_status_without_project_fails() {
    let tmp = TempDir::new().unwrap();
    gl(tmp.path())
        .arg("status")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error: .greenlight/ directory not found"));
}

#[test]
fn local_install_check_uninstall() {
    let tmp = TempDir::new().unwrap();

    gl(tmp.path())
        .args(["install", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greenlight installed to"));
    assert!(tmp.path().join("CLAUDE.md").is_file());

    gl(tmp.path())
        .args(["check", "--local", "--verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files verified"));

    gl(tmp.path())
        .args(["uninstall", "--local"])
        .assert()
        .success();

    gl(tmp.path())
        .args(["check", "--local"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("MISSING"));
}

#[test]
fn global_install_uses_home() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    gl(project.path())
        .args(["install", "--global"])
        .env("HOME", home.path())
        .assert()
        .success();

    assert!(home.path().join(".claude/CLAUDE.md").is_file());
    assert!(home.path().join(".claude/.greenlight-version").is_file());
    assert!(!project.path().join(".claude").exists());
}

#[test]
fn replace_strategy_backs_up_claude_md() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("CLAUDE.md"), "mine\n").unwrap();
    gl(tmp.path())
        .args(["install", "--local", "--on-conflict=replace"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("CLAUDE.md.backup")).unwrap(),
        "mine\n"
    );
}

#[test]
fn scope_and_conflict_flag_errors() {
    let tmp = TempDir::new().unwrap();
    gl(tmp.path())
        .args(["install", "--global", "--local"])
        .assert()
        .code(1)
        .stdout("error: cannot specify both --global and --local\n");

    gl(tmp.path())
        .arg("uninstall")
        .assert()
        .code(1)
        .stdout("error: must specify --global or --local\n");

    gl(tmp.path())
        .args(["install", "--local", "--on-conflict=merge"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error: invalid --on-conflict value"));
    assert!(!tmp.path().join(".claude").exists());
}

#[test]
fn init_inside_host_names_skill() {
    let tmp = TempDir::new().unwrap();
    gl(tmp.path())
        .arg("init")
        .env("CLAUDE_CODE", "1")
        .assert()
        .success()
        .stdout("Run the /gl:init skill to initialise this project.\n");
}

#[test]
fn init_without_assistant_fails() {
    let tmp = TempDir::new().unwrap();
    gl(tmp.path())
        .arg("init")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "error: claude binary not found in PATH. Install claude to use this command.",
        ));
}

#[test]
fn roadmap_and_changelog() {
    let tmp = shop();
    gl(tmp.path())
        .arg("roadmap")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("gl design"));

    std::fs::write(tmp.path().join(".greenlight/ROADMAP.md"), "# Shop\n").unwrap();
    gl(tmp.path()).arg("roadmap").assert().success().stdout("# Shop\n");

    gl(tmp.path())
        .arg("changelog")
        .assert()
        .success()
        .stdout("No changelog entries yet.\n");
}

#[test]
fn version_help_and_parse_errors() {
    let tmp = TempDir::new().unwrap();
    gl(tmp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("greenlight "));

    gl(tmp.path())
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: gl <command> [flags]"))
        .stdout(predicate::str::contains("Run 'gl init' to start a new project."));

    gl(tmp.path()).arg("--help").assert().success();
    gl(tmp.path()).args(["slice", "--max", "many"]).assert().code(1);
    gl(tmp.path()).arg("frobnicate").assert().code(1);
}
