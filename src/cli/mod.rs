//! Command-line interface for lidarr-hunter.
//!
//! All options double as environment variables so the daemon can be driven
//! entirely from a container environment.

mod commands;

pub use commands::{Cli, Commands, run};
