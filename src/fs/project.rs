use std::path::{Path, PathBuf};

use crate::error::{GlError, Result};
use crate::models::constants::{
    CONFIG_FILE, GRAPH_FILE, PROJECT_DIR, ROADMAP_FILE, SLICES_DIR, SUMMARIES_DIR,
};

/// Paths inside a project's `.greenlight/` directory.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
    base: PathBuf,
}

impl ProjectDir {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        Self {
            root: base.join(PROJECT_DIR),
            base,
        }
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Fail with [`GlError::ProjectAbsent`] unless `.greenlight/` exists.
    pub fn require(&self) -> Result<()> {
        if !self.exists() {
            return Err(GlError::ProjectAbsent);
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that contains `.greenlight/`.
    pub fn project_root(&self) -> &Path {
        &self.base
    }

    /// Last path component of the project root, used in session names.
    pub fn basename(&self) -> String {
        let absolute = std::path::absolute(&self.base).unwrap_or_else(|_| self.base.clone());
        absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }

    pub fn slices_dir(&self) -> PathBuf {
        self.root.join(SLICES_DIR)
    }

    pub fn graph_path(&self) -> PathBuf {
        self.root.join(GRAPH_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn roadmap_path(&self) -> PathBuf {
        self.root.join(ROADMAP_FILE)
    }

    pub fn summaries_dir(&self) -> PathBuf {
        self.root.join(SUMMARIES_DIR)
    }
}
