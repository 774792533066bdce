//! Files embedded in the binary and written by `gl install`

/// One installed file, relative to the install directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: &'static str,
    pub content: &'static str,
}

/// Project instructions. Placed next to the install directory for local scope.
pub const CLAUDE_MD: &str = "CLAUDE.md";

/// Written next to an existing `CLAUDE.md` by the keep strategy.
pub const CLAUDE_GREENLIGHT_MD: &str = "CLAUDE_GREENLIGHT.md";

/// Copy of the user's `CLAUDE.md` made by the replace strategy.
pub const CLAUDE_MD_BACKUP: &str = "CLAUDE.md.backup";

/// Version stamp written after every install.
pub const VERSION_FILE: &str = ".greenlight-version";

macro_rules! entry {
    ($path:literal) => {
        ManifestEntry {
            path: $path,
            content: include_str!(concat!("../../resources/content/", $path)),
        }
    };
}

pub static MANIFEST: &[ManifestEntry] = &[
    entry!("agents/gl-implementer.md"),
    entry!("agents/gl-test-writer.md"),
    entry!("agents/gl-verifier.md"),
    entry!("commands/gl/design.md"),
    entry!("commands/gl/init.md"),
    entry!("commands/gl/slice.md"),
    entry!("commands/gl/status.md"),
    entry!("references/verification-patterns.md"),
    entry!("templates/config.md"),
    entry!("templates/state.md"),
    entry!("CLAUDE.md"),
];

/// Directories the manifest creates, deepest first.
pub const MANIFEST_DIRS: &[&str] = &["commands/gl", "commands", "agents", "references", "templates"];

pub fn lookup(path: &str) -> Option<&'static ManifestEntry> {
    MANIFEST.iter().find(|entry| entry.path == path)
}
