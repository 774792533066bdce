//! Writing `CLAUDE.md` over a file the user may already have

use std::io::Write;
use std::path::Path;

use crate::error::{InstallError, Result};

use super::manifest::{CLAUDE_GREENLIGHT_MD, CLAUDE_MD_BACKUP};
use super::scope::ConflictStrategy;

/// Write `content` to `dest`, resolving an existing file with `strategy`.
pub fn write_with_strategy(
    dest: &Path,
    content: &str,
    strategy: ConflictStrategy,
    out: &mut dyn Write,
) -> Result<()> {
    let dir = dest.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(|source| InstallError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let existing = match std::fs::read_to_string(dest) {
        Ok(existing) => existing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return write(dest, content);
        }
        Err(source) => {
            return Err(InstallError::Write {
                path: dest.to_path_buf(),
                source,
            }
            .into())
        }
    };

    match strategy {
        ConflictStrategy::Keep => {
            write(&dir.join(CLAUDE_GREENLIGHT_MD), content)?;
            writeln!(
                out,
                "  existing CLAUDE.md kept; greenlight version saved as {CLAUDE_GREENLIGHT_MD}"
            )?;
        }
        ConflictStrategy::Replace => {
            let backup = dir.join(CLAUDE_MD_BACKUP);
            write(&backup, &existing)?;
            writeln!(out, "  existing CLAUDE.md backed up to {}", backup.display())?;
            write(dest, content)?;
        }
        ConflictStrategy::Append => {
            let mut combined = existing;
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(content);
            write(dest, &combined)?;
            writeln!(out, "  greenlight content appended to existing CLAUDE.md")?;
        }
    }
    Ok(())
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| InstallError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolve(existing: Option<&str>, strategy: ConflictStrategy) -> (TempDir, String) {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("CLAUDE.md");
        if let Some(existing) = existing {
            std::fs::write(&dest, existing).unwrap();
        }
        let mut out = Vec::new();
        write_with_strategy(&dest, "greenlight\n", strategy, &mut out).unwrap();
        (tmp, String::from_utf8(out).unwrap())
    }

    fn read(tmp: &TempDir, name: &str) -> String {
        std::fs::read_to_string(tmp.path().join(name)).unwrap()
    }

    #[test]
    fn test_no_existing_file_writes_directly() {
        let (tmp, output) = resolve(None, ConflictStrategy::Keep);
        assert_eq!(read(&tmp, "CLAUDE.md"), "greenlight\n");
        assert!(!tmp.path().join("CLAUDE_GREENLIGHT.md").exists());
        assert!(output.is_empty());
    }

    #[test]
    fn test_keep_saves_alongside() {
        let (tmp, output) = resolve(Some("mine\n"), ConflictStrategy::Keep);
        assert_eq!(read(&tmp, "CLAUDE.md"), "mine\n");
        assert_eq!(read(&tmp, "CLAUDE_GREENLIGHT.md"), "greenlight\n");
        assert!(output.contains("existing CLAUDE.md kept"));
    }

    #[test]
    fn test_replace_backs_up_first() {
        let (tmp, output) = resolve(Some("mine\n"), ConflictStrategy::Replace);
        assert_eq!(read(&tmp, "CLAUDE.md"), "greenlight\n");
        assert_eq!(read(&tmp, "CLAUDE.md.backup"), "mine\n");
        assert!(output.contains("backed up to"));
    }

    #[test]
    fn test_append_adds_missing_newline() {
        let (tmp, _) = resolve(Some("mine"), ConflictStrategy::Append);
        assert_eq!(read(&tmp, "CLAUDE.md"), "mine\ngreenlight\n");

        let (tmp, _) = resolve(Some("mine\n"), ConflictStrategy::Append);
        assert_eq!(read(&tmp, "CLAUDE.md"), "mine\ngreenlight\n");
    }
}
