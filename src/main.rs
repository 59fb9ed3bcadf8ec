//! Lidarr Hunter - finds monitored-but-missing music and asks Lidarr to go get it.
//!
//! The daemon polls a Lidarr server's REST API for artists, albums, or tracks
//! that are monitored but incomplete on disk, then triggers refresh + search
//! commands against them, throttled and randomized so external indexers are
//! not hammered.

pub mod cli;
pub mod config;
pub mod hunt;
pub mod lidarr;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging. DEBUG_MODE widens the default directive; RUST_LOG
    // still takes precedence for fine-grained control.
    let default_directive = if args.debug {
        "lidarr_hunter=debug"
    } else {
        "lidarr_hunter=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::from_default_env()
                .add_directive(default_directive.parse().expect("static directive parses")),
        )
        .init();

    cli::run(&args)
}
