pub mod config;
pub mod graph_file;
pub mod project;
pub mod slice_files;
pub mod snapshot;

pub use config::Config;
pub use graph_file::read_graph;
pub use project::ProjectDir;
pub use slice_files::read_slices;
pub use snapshot::Snapshot;
