//! Installer conflict handling through the library API

use greenlight::installer::{ConflictStrategy, Installer, Scope, MANIFEST};
use tempfile::TempDir;

fn install(tmp: &TempDir, strategy: ConflictStrategy) -> String {
    colored::control::set_override(false);
    let installer = Installer::new(tmp.path().join(".claude"), Scope::Local);
    let mut out = Vec::new();
    installer.install(strategy, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_append_twice_keeps_user_content_first() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("CLAUDE.md"), "# My rules").unwrap();

    install(&tmp, ConflictStrategy::Append);
    let content = std::fs::read_to_string(tmp.path().join("CLAUDE.md")).unwrap();
    assert!(content.starts_with("# My rules\n# Greenlight"));
}

#[test]
fn test_reinstall_is_idempotent_for_manifest_files() {
    let tmp = TempDir::new().unwrap();
    install(&tmp, ConflictStrategy::Keep);
    let output = install(&tmp, ConflictStrategy::Keep);

    // The first install created CLAUDE.md, so the second one keeps it.
    assert!(output.contains("existing CLAUDE.md kept"));
    let installed = output.matches("  installed ").count();
    assert_eq!(installed, MANIFEST.len());
}

#[test]
fn test_verify_flags_kept_user_claude_md_as_modified() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("CLAUDE.md"), "mine\n").unwrap();
    install(&tmp, ConflictStrategy::Keep);

    let installer = Installer::new(tmp.path().join(".claude"), Scope::Local);
    let mut out = Vec::new();
    let report = installer.check(true, &mut out).unwrap();
    assert_eq!(report.modified, 1);
    assert!(String::from_utf8(out).unwrap().contains("MODIFIED CLAUDE.md"));
}
