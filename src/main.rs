use std::process::ExitCode;

use clap::Parser;
use hue_cli::HttpApi;
use hue_cli::cli::{Cli, Commands, execute_command};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let local = match &cli.command {
        Commands::Discover { target } | Commands::CreateUser { target, .. } => target.local,
        Commands::Scenes { .. } => false,
    };

    let api = match HttpApi::new(cli.settings()) {
        Ok(api) => api.with_local_discovery(local),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match execute_command(&cli, &api, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Default filter when `RUST_LOG` is unset; `--verbose` only raises this crate.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "warn,hue_cli=debug" } else { "warn" }
}

/// Logs go to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
