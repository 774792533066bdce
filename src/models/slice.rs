use std::fmt;
use std::str::FromStr;

use crate::parser::frontmatter::Fields;

/// Lifecycle status of a slice, as written by the assistant.
///
/// The set is open: statuses this version does not know are kept verbatim in
/// [`SliceStatus::Other`] and ignored by the readiness solver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SliceStatus {
    Pending,
    InProgress,
    Complete,
    Failed,
    Other(String),
}

impl SliceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SliceStatus::Pending => "pending",
            SliceStatus::InProgress => "in_progress",
            SliceStatus::Complete => "complete",
            SliceStatus::Failed => "failed",
            SliceStatus::Other(s) => s,
        }
    }

    /// Map a raw status string, keeping unknown values verbatim.
    pub fn from_name(s: &str) -> Self {
        match s {
            "pending" => SliceStatus::Pending,
            "in_progress" => SliceStatus::InProgress,
            "complete" => SliceStatus::Complete,
            "failed" => SliceStatus::Failed,
            other => SliceStatus::Other(other.to_string()),
        }
    }
}

impl FromStr for SliceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SliceStatus::from_name(s))
    }
}

impl fmt::Display for SliceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work, read from `.greenlight/slices/<id>.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub id: String,
    pub status: SliceStatus,
    pub step: String,
    pub milestone: String,
    pub started: String,
    pub updated: String,
    pub tests: u32,
    pub security_tests: u32,
    pub session: String,
    pub deps: Vec<String>,
}

impl Slice {
    /// Build a slice from parsed frontmatter fields.
    ///
    /// Missing fields are empty; counts that are not numbers become 0.
    pub fn from_fields(fields: &Fields) -> Self {
        let text = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let count = |key: &str| {
            fields
                .get(key)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0)
        };

        Self {
            id: text("id"),
            status: SliceStatus::from_name(&text("status")),
            step: text("step"),
            milestone: text("milestone"),
            started: text("started"),
            updated: text("updated"),
            tests: count("tests"),
            security_tests: count("security_tests"),
            session: text("session"),
            deps: parse_deps(fields.get("deps").map(String::as_str).unwrap_or("")),
        }
    }
}

/// Split a comma-separated dependency list, dropping empty entries.
pub fn parse_deps(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
