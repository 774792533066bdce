//! Starting assistant sessions for a plan

use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};

use crate::error::{AssistantError, Result};
use crate::plan::{Mode, Plan};
use crate::process::Assistant;

use super::terminal::tmux::{attach_hint, shell_command, Tmux};

/// Split a planned argument vector into its prompt and trailing flags.
///
/// Planned commands always look like `claude -p <prompt> <flags...>`.
fn prompt_and_flags(argv: &[String]) -> (&str, &[String]) {
    match argv {
        [_, _, prompt, flags @ ..] => (prompt.as_str(), flags),
        _ => ("", &[]),
    }
}

/// Starts one slice at a time for the watch loop.
pub trait Launcher {
    /// Start `id` without waiting for it to finish.
    fn launch(&mut self, id: &str, argv: &[String]) -> Result<()>;

    /// Slices whose process has exited since the last call.
    ///
    /// Launchers that cannot observe their sessions return nothing.
    fn finished(&mut self) -> Vec<String> {
        Vec::new()
    }

    /// Printed once after the first launch.
    fn describe(&self) -> Option<String> {
        None
    }
}

/// Opens one tmux window per slice in a shared session. Never attaches.
pub struct MuxLauncher {
    tmux: Tmux,
    session: String,
    dir: PathBuf,
    session_ready: bool,
}

impl MuxLauncher {
    pub fn new(tmux: Tmux, session: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            tmux,
            session: session.into(),
            dir: dir.into(),
            session_ready: false,
        }
    }
}

impl Launcher for MuxLauncher {
    fn launch(&mut self, id: &str, argv: &[String]) -> Result<()> {
        let command = shell_command(argv);

        if !self.session_ready && self.tmux.has_session(&self.session)? {
            self.session_ready = true;
        }

        if self.session_ready {
            self.tmux.add_window(&self.session, id, &command)?;
        } else {
            self.tmux
                .new_session(&self.session, id, &self.dir, &command)?;
            self.session_ready = true;
        }

        tracing::debug!(slice = id, session = %self.session, "launched slice window");
        Ok(())
    }

    fn describe(&self) -> Option<String> {
        Some(format!(
            "sessions run in tmux; join with: {}",
            attach_hint(&self.session)
        ))
    }
}

/// Spawns headless assistants and reaps them as they exit.
pub struct HeadlessLauncher {
    assistant: Assistant,
    dir: PathBuf,
    children: Vec<(String, Child)>,
}

impl HeadlessLauncher {
    pub fn new(assistant: Assistant, dir: impl Into<PathBuf>) -> Self {
        Self {
            assistant,
            dir: dir.into(),
            children: Vec::new(),
        }
    }
}

impl Launcher for HeadlessLauncher {
    fn launch(&mut self, id: &str, argv: &[String]) -> Result<()> {
        let (prompt, flags) = prompt_and_flags(argv);
        let child = self.assistant.spawn_headless(
            prompt,
            flags,
            &self.dir,
            Stdio::inherit(),
            Stdio::inherit(),
        )?;
        tracing::debug!(slice = id, pid = child.id(), "spawned headless slice");
        self.children.push((id.to_string(), child));
        Ok(())
    }

    fn finished(&mut self) -> Vec<String> {
        let mut done = Vec::new();
        self.children.retain_mut(|(id, child)| match child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!(slice = %id, %status, "headless slice exited");
                done.push(id.clone());
                false
            }
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(slice = %id, error = %e, "could not poll headless slice");
                done.push(id.clone());
                false
            }
        });
        done
    }
}

/// Run a spawning plan to completion in this terminal.
///
/// Headless modes wait for the session; parallel mode creates the tmux
/// session, adds the remaining windows and attaches. A failed attach only
/// warns, since the windows are already running.
pub fn execute(
    plan: &Plan,
    assistant: &Assistant,
    tmux: &Tmux,
    project_root: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    match plan.mode {
        Mode::SingleHeadless | Mode::Sequential => {
            let (Some(id), Some(argv)) = (plan.targets.first(), plan.commands.first()) else {
                return Ok(());
            };
            if let Some(reason) = &plan.reason {
                writeln!(out, "{} {}", "→".cyan().bold(), reason)?;
            }
            if let Some(hint) = &plan.hint {
                writeln!(out, "  {}", hint.dimmed())?;
            }
            run_headless(id, argv, assistant, project_root, out)
        }
        Mode::ParallelMux => run_parallel(plan, assistant, tmux, project_root, out),
        Mode::InsideHost | Mode::DryRunSummary | Mode::Idle => Ok(()),
    }
}

fn run_headless(
    id: &str,
    argv: &[String],
    assistant: &Assistant,
    project_root: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{} Running slice {}", "→".cyan().bold(), id.bold())?;
    out.flush()?;

    let (prompt, flags) = prompt_and_flags(argv);
    let mut child = assistant.spawn_headless(
        prompt,
        flags,
        project_root,
        Stdio::inherit(),
        Stdio::inherit(),
    )?;
    let status = child.wait().map_err(AssistantError::StartFailure)?;

    if !status.success() {
        return Err(AssistantError::Exited(status.code().unwrap_or(-1)).into());
    }
    writeln!(out, "{} Slice {} session finished", "✓".green().bold(), id)?;
    Ok(())
}

fn run_parallel(
    plan: &Plan,
    assistant: &Assistant,
    tmux: &Tmux,
    project_root: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(session) = plan.session_name.as_deref() else {
        return Ok(());
    };
    let mut windows = plan.targets.iter().zip(&plan.commands);
    let Some((first_id, first_argv)) = windows.next() else {
        return Ok(());
    };

    writeln!(
        out,
        "{} Starting {} slice(s) in tmux session {}",
        "→".cyan().bold(),
        plan.targets.len(),
        session.bold()
    )?;
    if let Some(hint) = &plan.hint {
        writeln!(out, "  {}", hint.dimmed())?;
    }

    if let Err(e) = tmux.new_session(session, first_id, project_root, &shell_command(first_argv)) {
        writeln!(
            out,
            "{} {e}; falling back to sequential mode",
            "warn:".yellow().bold()
        )?;
        return run_headless(first_id, first_argv, assistant, project_root, out);
    }
    writeln!(out, "  {} window {}", "✓".green(), first_id)?;

    for (id, argv) in windows {
        match tmux.add_window(session, id, &shell_command(argv)) {
            Ok(()) => writeln!(out, "  {} window {}", "✓".green(), id)?,
            Err(e) => writeln!(out, "{} {e}", "warn:".yellow().bold())?,
        }
    }

    out.flush()?;
    if let Err(e) = tmux.attach(session) {
        writeln!(out, "{} {e}", "warn:".yellow().bold())?;
        writeln!(out, "  join with: {}", attach_hint(session))?;
    }
    Ok(())
}
