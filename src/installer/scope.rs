//! `--global` / `--local` and `--on-conflict` flag parsing

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::FlagError;

/// Directory name the assistant reads its files from.
pub const INSTALL_DIR: &str = ".claude";

/// Where installed files go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `$HOME/.claude/`
    Global,
    /// `<project>/.claude/`
    Local,
}

impl Scope {
    /// Exactly one of the two flags must be set.
    pub fn from_flags(global: bool, local: bool) -> Result<Self, FlagError> {
        match (global, local) {
            (true, true) => Err(FlagError::BothScopes),
            (true, false) => Ok(Scope::Global),
            (false, true) => Ok(Scope::Local),
            (false, false) => Err(FlagError::NoScope),
        }
    }

    /// Install directory for this scope. `root` is the project root.
    pub fn resolve_dir(&self, root: &Path) -> Result<PathBuf, FlagError> {
        match self {
            Scope::Global => dirs::home_dir()
                .map(|home| home.join(INSTALL_DIR))
                .ok_or(FlagError::HomeNotFound),
            Scope::Local => Ok(root.join(INSTALL_DIR)),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Local => write!(f, "local"),
        }
    }
}

/// What `install` does with an existing `CLAUDE.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictStrategy {
    /// Leave it alone; write ours as `CLAUDE_GREENLIGHT.md`.
    #[default]
    Keep,
    /// Back it up to `CLAUDE.md.backup`, then overwrite.
    Replace,
    /// Append ours after it.
    Append,
}

impl FromStr for ConflictStrategy {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(ConflictStrategy::Keep),
            "replace" => Ok(ConflictStrategy::Replace),
            "append" => Ok(ConflictStrategy::Append),
            other => Err(FlagError::InvalidConflictStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictStrategy::Keep => write!(f, "keep"),
            ConflictStrategy::Replace => write!(f, "replace"),
            ConflictStrategy::Append => write!(f, "append"),
        }
    }
}
