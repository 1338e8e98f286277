//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{get, grid, list, proximity, snapshot, theme};

/// Explore a content space and the views built from it.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version = env!("FOLIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Content endpoint base URL, or a file:// fixture directory
    /// (defaults to CONTENTFUL_ENDPOINT, then the public GraphQL endpoint)
    #[arg(long, env = "FOLIO_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of a collection
    List(list::ListArgs),

    /// Fetch a single entry by slug
    Get(get::GetArgs),

    /// Page through a collection the way a grid does
    Grid(grid::GridArgs),

    /// Copy collections and entries into a fixture directory
    Snapshot(snapshot::SnapshotArgs),

    /// Evaluate a scroll theme breakpoint file
    Theme(theme::ThemeArgs),

    /// Compute the active item of a scrolling section
    Proximity(proximity::ProximityArgs),
}
