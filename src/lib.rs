//! greenlight: orchestrates AI-assisted, slice-based development
//!
//! The `gl` binary reads per-slice state from `.greenlight/`, works out
//! which slices are ready, and runs them through the `claude` assistant,
//! optionally fanned out over `tmux` windows.

pub mod commands;
pub mod error;
pub mod fs;
pub mod installer;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod plan;
pub mod process;
