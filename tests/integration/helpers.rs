//! Shared helpers: temporary greenlight projects

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One slice file: `(id, status, step)`.
pub type SliceSpec<'a> = (&'a str, &'a str, &'a str);

/// Create a project with the given slice files and optional graph JSON.
pub fn project(slices: &[SliceSpec<'_>], graph: Option<&str>) -> TempDir {
    let tmp = TempDir::new().expect("Failed to create temp directory");
    let dir = tmp.path().join(".greenlight/slices");
    fs::create_dir_all(&dir).expect("Failed to create slices directory");
    for (id, status, step) in slices {
        write_slice(tmp.path(), id, status, step);
    }
    if let Some(graph) = graph {
        fs::write(tmp.path().join(".greenlight/GRAPH.json"), graph).expect("Failed to write graph");
    }
    tmp
}

/// Rewrite a slice file with a new status.
pub fn write_slice(root: &Path, id: &str, status: &str, step: &str) {
    fs::write(
        root.join(".greenlight/slices").join(format!("{id}.md")),
        format!("---\nid: {id}\nstatus: {status}\nstep: {step}\ntests: 2\nsecurity_tests: 1\n---\n\n# {id}\n"),
    )
    .expect("Failed to write slice file");
}

/// S-01 complete, S-02 running, S-03/S-04 ready, S-05 blocked on S-03.
pub const SHOP_GRAPH: &str = r#"{
  "slices": {
    "S-01": {"id": "S-01", "name": "Accounts", "depends_on": [], "wave": 1},
    "S-02": {"id": "S-02", "name": "Cart", "depends_on": ["S-01"], "wave": 2},
    "S-03": {"id": "S-03", "name": "Search", "depends_on": ["S-01"], "wave": 2},
    "S-04": {"id": "S-04", "name": "Checkout", "depends_on": ["S-01"], "wave": 2},
    "S-05": {"id": "S-05", "name": "Orders", "depends_on": ["S-03"], "wave": 3}
  },
  "edges": [{"from": "S-03", "to": "S-05", "reason": "orders need search"}]
}"#;

pub fn shop() -> TempDir {
    project(
        &[
            ("S-01", "complete", "done"),
            ("S-02", "in_progress", "implementing"),
            ("S-03", "pending", ""),
            ("S-04", "pending", ""),
            ("S-05", "pending", ""),
        ],
        Some(SHOP_GRAPH),
    )
}
