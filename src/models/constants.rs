/// Name of the project directory at the project root.
pub const PROJECT_DIR: &str = ".greenlight";

/// Slice state files, relative to the project directory.
pub const SLICES_DIR: &str = "slices";

/// Dependency graph, relative to the project directory.
pub const GRAPH_FILE: &str = "GRAPH.json";

/// Project configuration, relative to the project directory.
pub const CONFIG_FILE: &str = "config.json";

pub const ROADMAP_FILE: &str = "ROADMAP.md";

pub const SUMMARIES_DIR: &str = "summaries";

/// Environment variable set by the assistant host for the processes it runs.
pub const HOST_CONTEXT_ENV: &str = "CLAUDE_CODE";

/// External AI assistant binary.
pub const ASSISTANT_BINARY: &str = "claude";

/// Terminal multiplexer binary.
pub const MUX_BINARY: &str = "tmux";

/// Namespace of the host skills (`/gl:slice`, `/gl:init`, ...).
pub const SKILL_PREFIX: &str = "gl";

/// Flag that must never reach an interactive assistant session.
pub const DANGEROUS_FLAG: &str = "--dangerously-skip-permissions";

/// Default concurrency cap for `gl slice`.
pub const DEFAULT_MAX_PARALLEL: usize = 4;

pub const DEFAULT_SESSION_PREFIX: &str = "gl";

/// Default seconds between watch loop ticks.
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 10;

/// Prompt that runs one slice inside a headless assistant.
pub fn slice_prompt(id: &str) -> String {
    format!("/{SKILL_PREFIX}:slice {id}")
}

/// Prompt for a skill without arguments, e.g. `/gl:init`.
pub fn skill_prompt(skill: &str) -> String {
    format!("/{SKILL_PREFIX}:{skill}")
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from, `GL_GIT_COMMIT` at compile time.
pub const GIT_COMMIT: &str = match option_env!("GL_GIT_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

/// Build date, `GL_BUILD_DATE` at compile time.
pub const BUILD_DATE: &str = match option_env!("GL_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};
