//! `gl roadmap`: print the project roadmap

use std::io::Write;
use std::path::Path;

use crate::error::{GlError, Result};
use crate::fs::ProjectDir;

pub fn execute(root: &Path, out: &mut dyn Write) -> Result<()> {
    let project = ProjectDir::new(root);
    project.require()?;

    let contents = std::fs::read_to_string(project.roadmap_path()).map_err(|_| {
        GlError::Missing(
            "ROADMAP.md not found. Use 'gl design' to create a roadmap for this project."
                .to_string(),
        )
    })?;
    write!(out, "{contents}")?;
    Ok(())
}
