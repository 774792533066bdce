//! tmux multiplexer adapter
//!
//! Parallel slices each get a window in one detached session named
//! `{prefix}-{project}`. Builders return the [`Command`] without running it.

mod session_ops;

use shell_escape::escape;
use std::borrow::Cow;
use std::path::Path;
use std::process::Command;

use crate::error::MuxError;
use crate::models::constants::MUX_BINARY;
use crate::process::{path_lookup, Lookup};

/// Handle on the tmux binary.
#[derive(Clone)]
pub struct Tmux {
    lookup: Lookup,
}

impl std::fmt::Debug for Tmux {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tmux").finish_non_exhaustive()
    }
}

impl Default for Tmux {
    fn default() -> Self {
        Self::new()
    }
}

impl Tmux {
    pub fn new() -> Self {
        Self::with_lookup(path_lookup)
    }

    pub fn with_lookup(lookup: Lookup) -> Self {
        Self { lookup }
    }

    pub fn is_available(&self) -> bool {
        (self.lookup)(MUX_BINARY).is_some()
    }

    fn ensure_available(&self) -> Result<(), MuxError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(MuxError::NotFound)
        }
    }

    /// `tmux new-session -d -s <name> -n <window> -c <dir> <command>`
    pub fn build_new_session(
        &self,
        name: &str,
        window: &str,
        dir: &Path,
        command: &str,
    ) -> Result<Command, MuxError> {
        self.ensure_available()?;
        let mut cmd = Command::new(MUX_BINARY);
        cmd.args(["new-session", "-d", "-s", name, "-n", window, "-c"])
            .arg(dir)
            .arg(command);
        Ok(cmd)
    }

    /// `tmux new-window -t <session> -n <name> <command>`
    pub fn build_add_window(
        &self,
        session: &str,
        name: &str,
        command: &str,
    ) -> Result<Command, MuxError> {
        self.ensure_available()?;
        let mut cmd = Command::new(MUX_BINARY);
        cmd.args(["new-window", "-t", session, "-n", name, command]);
        Ok(cmd)
    }

    /// `tmux attach-session -t <session>`
    pub fn build_attach(&self, session: &str) -> Result<Command, MuxError> {
        self.ensure_available()?;
        let mut cmd = Command::new(MUX_BINARY);
        cmd.args(["attach-session", "-t", session]);
        Ok(cmd)
    }

    /// `tmux has-session -t <session>`
    pub fn build_has_session(&self, session: &str) -> Result<Command, MuxError> {
        self.ensure_available()?;
        let mut cmd = Command::new(MUX_BINARY);
        cmd.args(["has-session", "-t", session]);
        Ok(cmd)
    }
}

/// Join an argument vector into one shell command line for a tmux window.
pub fn shell_command(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| escape(Cow::Borrowed(arg.as_str())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Command line printed for users who want to join a session.
pub fn attach_hint(session: &str) -> String {
    format!("{MUX_BINARY} attach -t {}", escape(Cow::Borrowed(session)))
}
