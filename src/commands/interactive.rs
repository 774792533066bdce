//! `gl init` and `gl design`: interactive assistant sessions

use colored::Colorize;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::fs::ProjectDir;
use crate::models::constants::skill_prompt;
use crate::models::ExecutionContext;
use crate::process::Assistant;

/// Start the project setup session. Does not need an existing project.
pub fn init(
    root: &Path,
    context: ExecutionContext,
    assistant: &Assistant,
    out: &mut dyn Write,
) -> Result<()> {
    if context.inside_host {
        writeln!(
            out,
            "Run the {} skill to initialise this project.",
            skill_prompt("init")
        )?;
        return Ok(());
    }

    writeln!(out, "{} Launching Greenlight init...", "→".cyan().bold())?;
    out.flush()?;
    assistant.run_interactive(&skill_prompt("init"), &[], root)?;
    Ok(())
}

/// Start a design session for an existing project.
pub fn design(
    root: &Path,
    context: ExecutionContext,
    assistant: &Assistant,
    out: &mut dyn Write,
) -> Result<()> {
    if context.inside_host {
        writeln!(
            out,
            "Run the {} skill to design slices for this project.",
            skill_prompt("design")
        )?;
        return Ok(());
    }

    ProjectDir::new(root).require()?;

    writeln!(
        out,
        "{} Launching Greenlight design session...",
        "→".cyan().bold()
    )?;
    out.flush()?;
    assistant.run_interactive(&skill_prompt("design"), &[], root)?;
    Ok(())
}
