//! Terminal multiplexer backends

pub mod tmux;
