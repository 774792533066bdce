use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the dependency graph stored in `GRAPH.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub wave: u32,
    #[serde(default)]
    pub contracts: Vec<String>,
}

/// Informational edge; readiness never consults these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub reason: String,
}

/// Dependency graph keyed by slice id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub slices: BTreeMap<String, GraphNode>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn contains(&self, id: &str) -> bool {
        self.slices.contains_key(id)
    }

    /// Graph dependencies of `id`; slices missing from the graph have none.
    pub fn depends_on(&self, id: &str) -> &[String] {
        self.slices
            .get(id)
            .map(|node| node.depends_on.as_slice())
            .unwrap_or(&[])
    }

    /// Wave of `id`, 0 when the slice is not in the graph.
    pub fn wave(&self, id: &str) -> u32 {
        self.slices.get(id).map(|node| node.wave).unwrap_or(0)
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.slices
            .get(id)
            .map(|node| node.name.as_str())
            .filter(|name| !name.is_empty())
    }
}
