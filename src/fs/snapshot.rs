use crate::error::StateError;
use crate::fs::graph_file::read_graph;
use crate::fs::project::ProjectDir;
use crate::fs::slice_files::read_slices;
use crate::models::{Graph, Slice};

/// Slices and graph as read at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub slices: Vec<Slice>,
    pub graph: Graph,
    /// `GRAPH.json` was absent; every pending slice counts as ready.
    pub graph_missing: bool,
}

impl Snapshot {
    /// Read the slice files and graph of a project.
    ///
    /// A missing graph degrades to an empty one. A graph that exists but
    /// cannot be decoded is an error.
    pub fn load(project: &ProjectDir) -> Result<Self, StateError> {
        let slices = read_slices(&project.slices_dir())?;

        let (graph, graph_missing) = match read_graph(&project.graph_path()) {
            Ok(graph) => (graph, false),
            Err(StateError::FileNotFound(path)) => {
                tracing::debug!(path = %path.display(), "graph missing, dependency info unavailable");
                (Graph::default(), true)
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            slices,
            graph,
            graph_missing,
        })
    }

    /// Like [`Snapshot::load`], but any graph failure degrades instead of
    /// failing. Used by read-only reports.
    pub fn load_lenient(project: &ProjectDir) -> Result<Self, StateError> {
        let slices = read_slices(&project.slices_dir())?;

        let (graph, graph_missing) = match read_graph(&project.graph_path()) {
            Ok(graph) => (graph, false),
            Err(e) => {
                tracing::debug!(error = %e, "graph unreadable, dependency info unavailable");
                (Graph::default(), true)
            }
        };

        Ok(Self {
            slices,
            graph,
            graph_missing,
        })
    }

    pub fn slice(&self, id: &str) -> Option<&Slice> {
        self.slices.iter().find(|s| s.id == id)
    }
}
