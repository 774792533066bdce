//! Session operations for the tmux adapter (create, add window, attach)

use std::path::Path;
use std::process::{ExitStatus, Output};

use super::Tmux;
use crate::error::MuxError;

/// stderr of a failed tmux call, or its exit status when stderr is empty.
pub(super) fn failure_text(status: ExitStatus, stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();
    if stderr.is_empty() {
        format!("exited with {status}")
    } else {
        stderr
    }
}

fn stderr_of(output: &Output) -> String {
    failure_text(output.status, &output.stderr)
}

pub(super) fn spawn_failed(command: &'static str) -> impl FnOnce(std::io::Error) -> MuxError {
    move |source| MuxError::Spawn { command, source }
}

impl Tmux {
    /// Create a detached session whose first window runs `command`.
    pub fn new_session(
        &self,
        name: &str,
        window: &str,
        dir: &Path,
        command: &str,
    ) -> Result<(), MuxError> {
        let output = self
            .build_new_session(name, window, dir, command)?
            .output()
            .map_err(spawn_failed("new-session"))?;

        if !output.status.success() {
            return Err(MuxError::CreateFailed {
                session: name.to_string(),
                stderr: stderr_of(&output),
            });
        }

        tracing::debug!(session = name, window, "created tmux session");
        Ok(())
    }

    /// Add a window running `command` to an existing session.
    pub fn add_window(&self, session: &str, name: &str, command: &str) -> Result<(), MuxError> {
        let output = self
            .build_add_window(session, name, command)?
            .output()
            .map_err(spawn_failed("new-window"))?;

        if !output.status.success() {
            return Err(MuxError::AddWindowFailed {
                window: name.to_string(),
                stderr: stderr_of(&output),
            });
        }

        tracing::debug!(session, window = name, "added tmux window");
        Ok(())
    }

    /// Attach this terminal to a session. Blocks until the user detaches.
    pub fn attach(&self, session: &str) -> Result<(), MuxError> {
        let status = self
            .build_attach(session)?
            .status()
            .map_err(spawn_failed("attach-session"))?;

        if !status.success() {
            return Err(MuxError::AttachFailed {
                session: session.to_string(),
                stderr: failure_text(status, &[]),
            });
        }

        Ok(())
    }

    /// Whether a session with this name is running.
    pub fn has_session(&self, session: &str) -> Result<bool, MuxError> {
        let output = self
            .build_has_session(session)?
            .output()
            .map_err(spawn_failed("has-session"))?;
        Ok(output.status.success())
    }
}
