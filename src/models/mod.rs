pub mod constants;
pub mod context;
pub mod graph;
pub mod slice;

pub use context::ExecutionContext;
pub use graph::{Edge, Graph, GraphNode};
pub use slice::{Slice, SliceStatus};
