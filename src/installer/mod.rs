//! Installing the assistant's agent, command and reference files
//!
//! Content is embedded at compile time (see [`manifest`]). `CLAUDE.md` is the
//! one asymmetric entry: for local scope it lives at the project root, next
//! to `.claude/`, rather than inside it.

pub mod conflict;
pub mod manifest;
pub mod scope;

use colored::Colorize;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::constants::{BUILD_DATE, GIT_COMMIT, VERSION};
use crate::error::{InstallError, Result};

pub use manifest::{ManifestEntry, MANIFEST};
pub use scope::{ConflictStrategy, Scope};

use manifest::{CLAUDE_GREENLIGHT_MD, CLAUDE_MD, CLAUDE_MD_BACKUP, MANIFEST_DIRS, VERSION_FILE};

/// Counts from [`Installer::check`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub total: usize,
    pub missing: usize,
    pub empty: usize,
    pub modified: usize,
    pub unreadable: usize,
    pub version_missing: bool,
    pub verify: bool,
}

impl CheckReport {
    /// A missing version file only fails presence checks.
    pub fn ok(&self) -> bool {
        let files_ok =
            self.missing == 0 && self.empty == 0 && self.modified == 0 && self.unreadable == 0;
        files_ok && (self.verify || !self.version_missing)
    }

    pub fn summary(&self) -> String {
        if self.verify {
            if self.ok() {
                format!("all {} files verified", self.total)
            } else {
                format!(
                    "{}/{} files verified ({} missing, {} empty, {} modified)",
                    self.total - self.missing - self.empty - self.modified - self.unreadable,
                    self.total,
                    self.missing,
                    self.empty,
                    self.modified
                )
            }
        } else if self.ok() {
            format!("all {} files present", self.total)
        } else {
            format!(
                "{}/{} files present ({} missing, {} empty)",
                self.total - self.missing,
                self.total,
                self.missing,
                self.empty
            )
        }
    }
}

/// Installs, removes and checks the manifest in one directory.
#[derive(Debug, Clone)]
pub struct Installer {
    target: PathBuf,
    scope: Scope,
}

impl Installer {
    pub fn new(target: impl Into<PathBuf>, scope: Scope) -> Self {
        Self {
            target: target.into(),
            scope,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Directory that holds `CLAUDE.md` and its conflict artifacts.
    pub fn claude_md_dir(&self) -> PathBuf {
        match self.scope {
            Scope::Global => self.target.clone(),
            Scope::Local => self
                .target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    fn dest(&self, entry: &ManifestEntry) -> PathBuf {
        if entry.path == CLAUDE_MD {
            self.claude_md_dir().join(CLAUDE_MD)
        } else {
            self.target.join(entry.path)
        }
    }

    /// Write every manifest file and the version stamp.
    pub fn install(&self, strategy: ConflictStrategy, out: &mut dyn Write) -> Result<()> {
        for entry in MANIFEST {
            let dest = self.dest(entry);
            if entry.path == CLAUDE_MD {
                conflict::write_with_strategy(&dest, entry.content, strategy, out)?;
                writeln!(out, "  installed {CLAUDE_MD} -> {}", dest.display())?;
                continue;
            }

            write_file(&dest, entry.content)?;
            writeln!(out, "  installed {}", entry.path)?;
        }

        write_file(
            &self.target.join(VERSION_FILE),
            &format!("{VERSION}\n{GIT_COMMIT}\n{BUILD_DATE}\n"),
        )?;
        tracing::debug!(target_dir = %self.target.display(), %strategy, "installed manifest");

        writeln!(
            out,
            "{} greenlight installed to {}",
            "✓".green().bold(),
            self.target.display()
        )?;
        Ok(())
    }

    /// Remove manifest files, never the user's `CLAUDE.md`.
    pub fn uninstall(&self, out: &mut dyn Write) -> Result<()> {
        for entry in MANIFEST.iter().filter(|e| e.path != CLAUDE_MD) {
            let dest = self.target.join(entry.path);
            match std::fs::remove_file(&dest) {
                Ok(()) => writeln!(out, "  removed {}", entry.path)?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(InstallError::Remove { path: dest, source }.into());
                }
            }
        }

        // Best effort: these may never have been written.
        let _ = std::fs::remove_file(self.target.join(VERSION_FILE));
        let artifacts = self.claude_md_dir();
        for name in [CLAUDE_GREENLIGHT_MD, CLAUDE_MD_BACKUP] {
            if std::fs::remove_file(artifacts.join(name)).is_ok() {
                writeln!(out, "  removed {name}")?;
            }
        }

        for dir in MANIFEST_DIRS {
            remove_if_empty(&self.target.join(dir));
        }

        writeln!(
            out,
            "{} greenlight uninstalled from {}",
            "✓".green().bold(),
            self.target.display()
        )?;
        Ok(())
    }

    /// Report missing, empty and, with `verify`, modified files.
    pub fn check(&self, verify: bool, out: &mut dyn Write) -> Result<CheckReport> {
        let mut report = CheckReport {
            total: MANIFEST.len(),
            verify,
            ..Default::default()
        };

        for entry in MANIFEST {
            let dest = self.dest(entry);
            let contents = match std::fs::read(&dest) {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    writeln!(out, "  {}  {}", "MISSING".red(), entry.path)?;
                    report.missing += 1;
                    continue;
                }
                Err(e) => {
                    writeln!(out, "  {}    {}: {e}", "ERROR".red(), entry.path)?;
                    report.unreadable += 1;
                    continue;
                }
            };

            if contents.is_empty() {
                writeln!(out, "  {}    {}", "EMPTY".yellow(), entry.path)?;
                report.empty += 1;
                continue;
            }

            if verify && sha256_hex(&contents) != sha256_hex(entry.content.as_bytes()) {
                writeln!(out, "  {} {}", "MODIFIED".yellow(), entry.path)?;
                report.modified += 1;
            }
        }

        match std::fs::read_to_string(self.target.join(VERSION_FILE)) {
            Ok(stamp) => {
                let version = stamp.lines().next().unwrap_or_default().trim();
                writeln!(out, "  version: {version}")?;
            }
            Err(_) => {
                writeln!(out, "  {}  {VERSION_FILE}", "MISSING".red())?;
                report.version_missing = true;
            }
        }

        writeln!(out, "{}", report.summary())?;
        Ok(report)
    }
}

fn write_file(dest: &Path, content: &str) -> Result<()> {
    let to_install_error = |source| InstallError::Write {
        path: dest.to_path_buf(),
        source,
    };
    if let Some(dir) = dest.parent() {
        std::fs::create_dir_all(dir).map_err(to_install_error)?;
    }
    std::fs::write(dest, content).map_err(to_install_error)?;
    Ok(())
}

fn remove_if_empty(dir: &Path) {
    let is_empty = std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false);
    if is_empty {
        let _ = std::fs::remove_dir(dir);
    }
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
