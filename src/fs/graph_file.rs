use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::StateError;
use crate::models::{Edge, Graph, GraphNode};

#[derive(Deserialize)]
struct GraphDocument {
    slices: Option<BTreeMap<String, GraphNode>>,
    #[serde(default)]
    edges: Vec<Edge>,
}

/// Read and decode `GRAPH.json`.
///
/// Node ids default to their map key when the node omits `id`.
pub fn read_graph(path: &Path) -> Result<Graph, StateError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StateError::FileNotFound(path.to_path_buf()),
        _ => StateError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_graph(&content, path)
}

fn parse_graph(content: &str, path: &Path) -> Result<Graph, StateError> {
    let doc: GraphDocument =
        serde_json::from_str(content).map_err(|source| StateError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let mut slices = doc
        .slices
        .ok_or_else(|| StateError::MissingSlices(path.to_path_buf()))?;

    for (key, node) in slices.iter_mut() {
        if node.id.is_empty() {
            node.id = key.clone();
        }
    }

    Ok(Graph {
        slices,
        edges: doc.edges,
    })
}
