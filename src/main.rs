mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> Result<ExitCode> {
    init_logging()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            e.print().context("failed to print usage")?;
            return Ok(code);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = match cli::dispatch(cli.command, &cli.root, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            writeln!(out, "error: {e}").context("failed to write to stdout")?;
            ExitCode::FAILURE
        }
    };
    out.flush().context("failed to flush stdout")?;
    Ok(code)
}

/// Diagnostics go to stderr, filtered by `GL_LOG` (default `warn`).
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env("GL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
