//! Integration tests for greenlight
//!
//! Library-level tests drive `plan` and the watch loop against temporary
//! projects; `cli` runs the `gl` binary with an isolated environment.

pub mod cli;
pub mod helpers;
pub mod install_flow;
pub mod slice_planning;
pub mod watch_loop;
