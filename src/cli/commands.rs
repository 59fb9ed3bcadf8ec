//! CLI definition and command handlers.
//!
//! Without a subcommand the hunter runs its infinite collect/hunt/cooldown
//! loop. `once` runs a single cycle (useful under external schedulers) and
//! `status` reports what would be hunted without sending any command.

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing::info;

use crate::config::{Config, HuntMode};
use crate::hunt::{self, candidates};
use crate::lidarr::{LidarrApi, LidarrClient};

/// Lidarr missing-content hunter
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lidarr API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Lidarr base URL
    #[arg(long, env = "API_URL", default_value = "http://localhost:8686")]
    pub api_url: String,

    /// Hunt granularity for the missing pass
    #[arg(long, env = "HUNT_MISSING_MODE", value_enum, default_value_t = HuntMode::Artist)]
    pub mode: HuntMode,

    /// Missing items to process per cycle (0 skips the missing pass)
    #[arg(long, env = "HUNT_MISSING_ITEMS", default_value_t = 1)]
    pub missing_items: u32,

    /// Cutoff-unmet albums to upgrade per cycle (0 disables upgrades)
    #[arg(long, env = "HUNT_UPGRADE_ALBUMS", default_value_t = 0)]
    pub upgrade_albums: u32,

    /// Seconds to sleep after each processed item
    #[arg(long, env = "SLEEP_DURATION", default_value_t = 900)]
    pub sleep_duration: u64,

    /// Only hunt monitored artists/albums/tracks
    #[arg(long, env = "MONITORED_ONLY", default_value_t = true, action = ArgAction::Set)]
    pub monitored_only: bool,

    /// Pick candidates uniformly at random instead of in list order
    #[arg(long, env = "RANDOM_SELECTION", default_value_t = true, action = ArgAction::Set)]
    pub random_selection: bool,

    /// Enable debug logging
    #[arg(long, env = "DEBUG_MODE", default_value_t = false, action = ArgAction::Set)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a single hunt cycle and exit
    Once,
    /// Collect candidates and print counts without sending any commands
    Status,
}

/// Dispatch the parsed CLI.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(cli);
    let client = LidarrClient::new(&config.base_url, &config.api_key)?;
    let rt = Runtime::new()?;

    match &cli.command {
        None => {
            config.log_settings();
            rt.block_on(run_loop(&client, &config));
            Ok(())
        }
        Some(Commands::Once) => {
            config.log_settings();
            rt.block_on(run_cycle(&client, &config));
            Ok(())
        }
        Some(Commands::Status) => {
            rt.block_on(cmd_status(&client, &config));
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> Config {
    Config {
        base_url: cli.api_url.clone(),
        api_key: cli.api_key.clone(),
        mode: cli.mode,
        max_items: cli.missing_items,
        upgrade_items: cli.upgrade_albums,
        monitored_only: cli.monitored_only,
        random_selection: cli.random_selection,
        item_sleep: Duration::from_secs(cli.sleep_duration),
        ..Config::default()
    }
}

/// The infinite hunt loop: cycle, cool down, re-collect.
///
/// External state changes between cycles (downloads completing, new albums
/// added), so every cycle starts from a fresh collection.
async fn run_loop<A: LidarrApi + ?Sized>(api: &A, config: &Config) {
    loop {
        run_cycle(api, config).await;
        info!(
            cooldown_secs = config.cycle_cooldown.as_secs(),
            "Cycle complete, cooling down"
        );
        tokio::time::sleep(config.cycle_cooldown).await;
    }
}

/// One full cycle: the missing pass, then the upgrade pass if budgeted.
async fn run_cycle<A: LidarrApi + ?Sized>(api: &A, config: &Config) {
    if config.max_items > 0 {
        let report = hunt::run_missing_cycle(api, config).await;
        info!(
            candidates = report.candidates,
            processed = report.processed,
            skipped = report.skipped,
            "Missing pass finished"
        );
    } else {
        info!("HUNT_MISSING_ITEMS is 0, skipping missing pass");
    }

    if config.upgrade_items > 0 {
        let report = hunt::run_upgrade_cycle(api, config).await;
        info!(
            candidates = report.candidates,
            processed = report.processed,
            skipped = report.skipped,
            "Upgrade pass finished"
        );
    }
}

/// Print what a cycle would hunt, without issuing commands.
async fn cmd_status<A: LidarrApi + ?Sized>(api: &A, config: &Config) {
    println!(
        "Checking {} for incomplete items (mode: {})...",
        config.base_url, config.mode
    );

    match candidates::collect(api, config).await {
        Ok(found) => {
            if found.is_empty() {
                println!("Nothing to hunt: library is complete.");
            } else {
                println!("{} candidate(s):", found.len());
                for candidate in found.iter().take(20) {
                    match candidate.title.as_deref() {
                        Some(title) => println!(
                            "  {} - {} ({} missing)",
                            candidate.artist_name, title, candidate.missing
                        ),
                        None => println!(
                            "  {} ({} missing)",
                            candidate.artist_name, candidate.missing
                        ),
                    }
                }
                if found.len() > 20 {
                    println!("  ... and {} more", found.len() - 20);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: could not reach Lidarr: {e}");
            std::process::exit(1);
        }
    }
}
