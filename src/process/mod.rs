//! Adapter for the external AI assistant binary
//!
//! Builders return a configured [`Command`] without running it so tests can
//! inspect argument vectors. The PATH lookup is injected per value; production
//! code uses [`path_lookup`].

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::AssistantError;
use crate::models::constants::{ASSISTANT_BINARY, DANGEROUS_FLAG};

/// Locates a binary by name.
pub type Lookup = fn(&str) -> Option<PathBuf>;

/// Look a binary up on `PATH`.
pub fn path_lookup(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Remove every occurrence of the permission-bypass flag.
pub fn strip_dangerous_flags(flags: &[String]) -> Vec<String> {
    flags
        .iter()
        .filter(|flag| flag.as_str() != DANGEROUS_FLAG)
        .cloned()
        .collect()
}

/// Handle on the assistant binary.
#[derive(Clone)]
pub struct Assistant {
    binary: String,
    lookup: Lookup,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("binary", &self.binary)
            .finish_non_exhaustive()
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

impl Assistant {
    pub fn new() -> Self {
        Self::with_lookup(path_lookup)
    }

    pub fn with_lookup(lookup: Lookup) -> Self {
        Self {
            binary: ASSISTANT_BINARY.to_string(),
            lookup,
        }
    }

    pub fn is_available(&self) -> bool {
        (self.lookup)(&self.binary).is_some()
    }

    fn ensure_available(&self) -> Result<(), AssistantError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(AssistantError::NotFound)
        }
    }

    /// Build `claude -p <prompt> <flags...>` in `dir` with the given output streams.
    pub fn build_headless(
        &self,
        prompt: &str,
        flags: &[String],
        dir: &Path,
        stdout: Stdio,
        stderr: Stdio,
    ) -> Result<Command, AssistantError> {
        self.ensure_available()?;
        if prompt.is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }

        let mut cmd = Command::new(&self.binary);
        cmd.arg("-p")
            .arg(prompt)
            .args(flags)
            .current_dir(dir)
            .stdout(stdout)
            .stderr(stderr);
        Ok(cmd)
    }

    /// Build and start a headless session. The caller waits on the child.
    pub fn spawn_headless(
        &self,
        prompt: &str,
        flags: &[String],
        dir: &Path,
        stdout: Stdio,
        stderr: Stdio,
    ) -> Result<Child, AssistantError> {
        let mut cmd = self.build_headless(prompt, flags, dir, stdout, stderr)?;
        tracing::debug!(prompt, dir = %dir.display(), "spawning headless assistant");
        cmd.spawn().map_err(AssistantError::StartFailure)
    }

    /// Build an interactive session.
    ///
    /// `-p <prompt>` is only passed for a non-empty prompt. The
    /// permission-bypass flag is always removed from `flags`.
    pub fn build_interactive(
        &self,
        prompt: &str,
        flags: &[String],
        dir: &Path,
    ) -> Result<Command, AssistantError> {
        self.ensure_available()?;

        let mut cmd = Command::new(&self.binary);
        if !prompt.is_empty() {
            cmd.arg("-p").arg(prompt);
        }
        cmd.args(strip_dangerous_flags(flags)).current_dir(dir);
        Ok(cmd)
    }

    /// Run an interactive session attached to this terminal and wait for it.
    pub fn run_interactive(
        &self,
        prompt: &str,
        flags: &[String],
        dir: &Path,
    ) -> Result<(), AssistantError> {
        let mut cmd = self.build_interactive(prompt, flags, dir)?;
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        tracing::debug!(prompt, "running interactive assistant");
        let status = cmd.status().map_err(AssistantError::StartFailure)?;
        if status.success() {
            Ok(())
        } else {
            Err(AssistantError::Exited(status.code().unwrap_or(-1)))
        }
    }
}
