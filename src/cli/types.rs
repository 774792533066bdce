use clap::{Parser, Subcommand};
use std::path::PathBuf;

use greenlight::models::constants::DEFAULT_MAX_PARALLEL;

#[derive(Parser)]
#[command(name = "gl")]
#[command(about = "Slice-based development orchestrator", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Project root (the directory containing .greenlight/)
    #[arg(long, global = true, env = "GL_ROOT", default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run ready slices, or one slice by ID
    Slice {
        /// Slice ID to run (default: every ready slice up to --max)
        id: Option<String>,

        /// Show what would run without starting anything
        #[arg(long)]
        dry_run: bool,

        /// Keep starting slices as dependencies complete
        #[arg(short, long)]
        watch: bool,

        /// Run one slice at a time
        #[arg(long)]
        sequential: bool,

        /// Maximum number of slices running at once
        #[arg(long, default_value_t = DEFAULT_MAX_PARALLEL)]
        max: usize,
    },

    /// Show current project status
    Status {
        /// One line for status bars: "N/M done | K running"
        #[arg(long)]
        compact: bool,
    },

    /// Show grouped command help and a project summary
    Help,

    /// Show version information
    Version,

    /// Print the project roadmap
    Roadmap,

    /// Print slice summaries
    Changelog,

    /// Initialise a new project in an interactive session
    Init,

    /// Design slices in an interactive session
    Design,

    /// Install agent, command and reference files
    Install {
        #[command(flatten)]
        scope: ScopeArgs,

        /// What to do with an existing CLAUDE.md: keep, replace or append
        #[arg(long, default_value = "keep")]
        on_conflict: String,
    },

    /// Remove installed files (never CLAUDE.md)
    Uninstall {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Verify an installation
    Check {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Compare contents against the embedded files
        #[arg(long)]
        verify: bool,
    },
}

#[derive(clap::Args)]
pub struct ScopeArgs {
    /// Install into $HOME/.claude
    #[arg(long)]
    pub global: bool,

    /// Install into ./.claude of the project
    #[arg(long)]
    pub local: bool,
}
