use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::constants::{DEFAULT_SESSION_PREFIX, DEFAULT_WATCH_INTERVAL_SECS};

/// Launch settings from `.greenlight/config.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Extra flags for every spawned assistant. Only ever sourced from config.
    pub assistant_flags: Vec<String>,
    pub mux_session_prefix: String,
    pub watch_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assistant_flags: Vec::new(),
            mux_session_prefix: DEFAULT_SESSION_PREFIX.to_string(),
            watch_interval_seconds: DEFAULT_WATCH_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    parallel: ParallelSection,
}

#[derive(Debug, Default, Deserialize)]
struct ParallelSection {
    #[serde(default, alias = "claude_flags")]
    assistant_flags: Vec<String>,
    #[serde(default, alias = "tmux_session_prefix")]
    mux_session_prefix: Option<String>,
    #[serde(default)]
    watch_interval_seconds: Option<u64>,
}

impl Config {
    /// Load the config file, falling back to defaults on any problem.
    ///
    /// A missing, unreadable or malformed file is not an error.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config not readable, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<ConfigFile>(&content) {
            Ok(file) => Self::from_section(file.parallel),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config not valid JSON, using defaults");
                Self::default()
            }
        }
    }

    fn from_section(section: ParallelSection) -> Self {
        let defaults = Self::default();
        Self {
            assistant_flags: section.assistant_flags,
            mux_session_prefix: section
                .mux_session_prefix
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.mux_session_prefix),
            watch_interval_seconds: section
                .watch_interval_seconds
                .filter(|secs| *secs >= 1)
                .unwrap_or(defaults.watch_interval_seconds),
        }
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval_seconds)
    }

    /// tmux session name for a project, e.g. `gl-shop-api`.
    pub fn session_name(&self, project_basename: &str) -> String {
        format!("{}-{}", self.mux_session_prefix, project_basename)
    }
}
