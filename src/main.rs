use std::process::{ExitCode, ExitStatus};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use venv_launcher::cli::{Cli, Display, Mode};
use venv_launcher::error::Result;
use venv_launcher::launcher::Bootstrap;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(status) => exit_code_for(status),
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("venv_launcher=debug")
    } else {
        EnvFilter::new("venv_launcher=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<ExitStatus> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let mode = Mode::from_arg(cli.mode.as_deref());

    let bootstrap = Bootstrap::load(root).await?;
    bootstrap.run(mode).await
}

/// Propagate the dispatched child's exit code as our own. A child killed
/// by a signal has no code; that maps to a generic failure.
fn exit_code_for(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    }
}
