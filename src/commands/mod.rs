//! One module per `gl` subcommand
//!
//! Every command writes user-facing output to the writer it is given and
//! returns a typed error; the binary turns errors into `error: ...` and exit 1.

pub mod changelog;
pub mod help;
pub mod install;
pub mod interactive;
pub mod roadmap;
pub mod slice;
pub mod status;
pub mod version;
