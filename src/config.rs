//! Runtime configuration.
//!
//! All knobs come from environment variables (or the matching CLI flags) and
//! are frozen into an immutable [`Config`] that gets passed into the hunt
//! loop. Nothing reads the environment after startup.
//!
//! Documented defaults:
//! - `API_URL`             http://localhost:8686
//! - `HUNT_MISSING_MODE`   artist
//! - `HUNT_MISSING_ITEMS`  1 (0 skips the missing pass)
//! - `HUNT_UPGRADE_ALBUMS` 0 (upgrade pass disabled)
//! - `SLEEP_DURATION`      900 seconds between processed items
//! - `MONITORED_ONLY`      true
//! - `RANDOM_SELECTION`    true

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use tracing::{debug, info};

/// What kind of entity a hunt cycle works through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HuntMode {
    /// Search per incomplete artist (MissingAlbumSearch)
    Artist,
    /// Search per incomplete album (AlbumSearch)
    Album,
    /// Search per missing track (TrackSearch)
    Song,
}

impl fmt::Display for HuntMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuntMode::Artist => write!(f, "artist"),
            HuntMode::Album => write!(f, "album"),
            HuntMode::Song => write!(f, "song"),
        }
    }
}

/// Immutable settings for one run of the daemon.
///
/// The pacing durations are fields rather than constants so tests can zero
/// them out and drive cycles instantly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lidarr base URL, no trailing slash
    pub base_url: String,
    /// Value for the X-Api-Key header
    pub api_key: String,
    /// Entity granularity for the missing pass
    pub mode: HuntMode,
    /// Max missing items processed per cycle; 0 skips the missing pass
    pub max_items: u32,
    /// Max cutoff-unmet albums processed per cycle; 0 disables upgrades
    pub upgrade_items: u32,
    /// Only consider monitored artists/albums/tracks
    pub monitored_only: bool,
    /// Pick candidates uniformly at random instead of in list order
    pub random_selection: bool,
    /// Sleep after each successfully processed item
    pub item_sleep: Duration,
    /// Wait between a refresh command and the follow-up search
    pub refresh_delay: Duration,
    /// Backoff after a rejected refresh before moving on
    pub failure_backoff: Duration,
    /// Cooldown between cycles (also applied when nothing was found)
    pub cycle_cooldown: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8686".to_string(),
            api_key: String::new(),
            mode: HuntMode::Artist,
            max_items: 1,
            upgrade_items: 0,
            monitored_only: true,
            random_selection: true,
            item_sleep: Duration::from_secs(900),
            refresh_delay: Duration::from_secs(5),
            failure_backoff: Duration::from_secs(10),
            cycle_cooldown: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Log the effective settings at startup.
    ///
    /// The API key is only emitted at debug level.
    pub fn log_settings(&self) {
        info!("=== Lidarr Hunter starting ===");
        info!(url = %self.base_url, "Lidarr server");
        info!(
            mode = %self.mode,
            max_items = self.max_items,
            upgrade_items = self.upgrade_items,
            "Hunt configuration"
        );
        info!(
            monitored_only = self.monitored_only,
            random_selection = self.random_selection,
            item_sleep_secs = self.item_sleep.as_secs(),
            "Selection and pacing"
        );
        debug!(api_key = %self.api_key, "API key");
    }
}
