use std::io::Write;
use std::path::Path;

use greenlight::commands::slice::SliceEnv;
use greenlight::commands::{
    changelog, help, install, interactive, roadmap, slice, status, version,
};
use greenlight::error::Result;
use greenlight::installer::{ConflictStrategy, Scope};
use greenlight::models::ExecutionContext;
use greenlight::plan::SliceRequest;
use greenlight::process::Assistant;

use super::types::{Commands, ScopeArgs};

pub fn dispatch(command: Commands, root: &Path, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Slice {
            id,
            dry_run,
            watch,
            sequential,
            max,
        } => {
            let request = SliceRequest {
                id,
                dry_run,
                watch,
                sequential,
                max,
            };
            slice::execute(root, &request, &SliceEnv::detect(), out)
        }
        Commands::Status { compact } => status::execute(root, compact, out),
        Commands::Help => help::execute(root, out),
        Commands::Version => version::execute(out),
        Commands::Roadmap => roadmap::execute(root, out),
        Commands::Changelog => changelog::execute(root, out),
        Commands::Init => {
            interactive::init(root, ExecutionContext::detect(), &Assistant::new(), out)
        }
        Commands::Design => {
            interactive::design(root, ExecutionContext::detect(), &Assistant::new(), out)
        }
        Commands::Install { scope, on_conflict } => {
            let scope = parse_scope(&scope)?;
            let strategy: ConflictStrategy = on_conflict.parse()?;
            install::install(root, scope, strategy, out)
        }
        Commands::Uninstall { scope } => install::uninstall(root, parse_scope(&scope)?, out),
        Commands::Check { scope, verify } => {
            install::check(root, parse_scope(&scope)?, verify, out)
        }
    }
}

fn parse_scope(args: &ScopeArgs) -> Result<Scope> {
    Ok(Scope::from_flags(args.global, args.local)?)
}
