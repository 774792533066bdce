//! Error types for greenlight.
//!
//! Each component owns a small enum so callers can discriminate failures by
//! matching variants. [`GlError`] composes them at the command boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Frontmatter block could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontmatterError {
    #[error("missing opening '---' delimiter")]
    MissingOpening,

    #[error("missing closing '---' delimiter")]
    MissingClosing,

    #[error("invalid frontmatter line {line}: {content:?}")]
    InvalidLine { line: usize, content: String },
}

/// Failures while reading slice files or the dependency graph.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("slices directory not found: {}", .0.display())]
    DirNotFound(PathBuf),

    #[error("no slice files found in {}", .0.display())]
    NoSliceFiles(PathBuf),

    #[error("failed to parse slice file {file}: {reason}")]
    ParseFailure { file: String, reason: String },

    #[error("graph file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid JSON in {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("graph file {} has no \"slices\" key", .0.display())]
    MissingSlices(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StateError {
    /// True when the error means a file or directory simply is not there.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StateError::DirNotFound(_) | StateError::FileNotFound(_)
        )
    }
}

/// Failures from the external assistant adapter.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("claude binary not found in PATH. Install claude to use this command.")]
    NotFound,

    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("failed to start claude: {0}")]
    StartFailure(#[source] std::io::Error),

    #[error("claude exited with status {0}")]
    Exited(i32),
}

/// Failures from the terminal multiplexer adapter.
#[derive(Debug, Error)]
pub enum MuxError {
    #[error("tmux not available in PATH")]
    NotFound,

    /// tmux could not be started at all.
    #[error("failed to run tmux {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create tmux session '{session}': {stderr}")]
    CreateFailed { session: String, stderr: String },

    #[error("failed to add tmux window '{window}': {stderr}")]
    AddWindowFailed { window: String, stderr: String },

    #[error("failed to attach to tmux session '{session}': {stderr}")]
    AttachFailed { session: String, stderr: String },
}

/// Invalid combinations or values of command-line flags.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("cannot specify both --global and --local")]
    BothScopes,

    #[error("must specify --global or --local")]
    NoScope,

    #[error("invalid --on-conflict value {0:?}: expected keep, replace, or append")]
    InvalidConflictStrategy(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,
}

/// Failures while writing or removing installed files.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("installing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("removing {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error surfaced by every subcommand.
#[derive(Debug, Error)]
pub enum GlError {
    #[error("not a greenlight project. Run 'gl init' first.")]
    ProjectAbsent,

    #[error("unknown slice ID \"{0}\". Run 'gl status' to see available slices.")]
    UnknownSliceId(String),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error(transparent)]
    Mux(#[from] MuxError),

    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error("{0}")]
    Missing(String),

    #[error("check failed: {0}")]
    CheckFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GlError>;
