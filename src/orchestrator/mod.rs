//! Running planned slices: one-shot launches and watch mode

pub mod launcher;
pub mod terminal;
pub mod watch;

pub use launcher::{execute, HeadlessLauncher, Launcher, MuxLauncher};
pub use terminal::tmux::Tmux;
pub use watch::{WatchConfig, WatchOutcome, Watcher};
