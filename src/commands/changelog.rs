//! `gl changelog`: concatenate slice summaries

use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::ProjectDir;

const NO_ENTRIES: &str = "No changelog entries yet.";

/// Print every `summaries/*.md` in filename order, separated by `---`.
pub fn execute(root: &Path, out: &mut dyn Write) -> Result<()> {
    let project = ProjectDir::new(root);
    project.require()?;

    let entries = match summary_files(&project.summaries_dir()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            writeln!(out, "{NO_ENTRIES}")?;
            return Ok(());
        }
        Err(e) => {
            writeln!(
                out,
                "{} could not read summaries directory: {e}",
                "warn:".yellow().bold()
            )?;
            writeln!(out, "{NO_ENTRIES}")?;
            return Ok(());
        }
    };

    if entries.is_empty() {
        writeln!(out, "{NO_ENTRIES}")?;
        return Ok(());
    }

    let mut printed = 0;
    for path in entries {
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                writeln!(out, "{} could not read {name}: {e}", "warn:".yellow().bold())?;
                continue;
            }
        };
        if printed > 0 {
            writeln!(out, "---")?;
        }
        write!(out, "{contents}")?;
        printed += 1;
    }
    Ok(())
}

/// Markdown files directly in `dir`, sorted by filename.
fn summary_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(".greenlight")).unwrap();
        tmp
    }

    fn run(root: &Path) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        execute(root, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_no_summaries_dir() {
        let tmp = project();
        assert_eq!(run(tmp.path()), "No changelog entries yet.\n");
    }

    #[test]
    fn test_only_non_markdown_files() {
        let tmp = project();
        let dir = tmp.path().join(".greenlight/summaries");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
        assert_eq!(run(tmp.path()), "No changelog entries yet.\n");
    }

    #[test]
    fn test_entries_in_filename_order_with_separators() {
        let tmp = project();
        let dir = tmp.path().join(".greenlight/summaries");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("S-02.md"), "second\n").unwrap();
        std::fs::write(dir.join("S-01.md"), "first\n").unwrap();
        std::fs::create_dir_all(dir.join("nested.md")).unwrap();

        assert_eq!(run(tmp.path()), "first\n---\nsecond\n");
    }
}
