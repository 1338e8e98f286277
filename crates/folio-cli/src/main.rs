//! folio - CLI tool for exploring content endpoints.
//!
//! A thin wrapper over the folio crates for manual inspection of a content
//! space (or a `file://` fixture directory) and of the grid, theme and
//! proximity view models.

mod cli;
mod commands;
mod output;
mod source;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{get, grid, list, proximity, snapshot, theme};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let endpoint = cli.endpoint.as_deref();
    match cli.command {
        Commands::List(args) => list::run(endpoint, args).await,
        Commands::Get(args) => get::run(endpoint, args).await,
        Commands::Grid(args) => grid::run(endpoint, args).await,
        Commands::Snapshot(args) => snapshot::run(endpoint, args).await,
        Commands::Theme(args) => theme::run(args),
        Commands::Proximity(args) => proximity::run(args),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
