//! Quality upgrade pass.
//!
//! Lidarr keeps a ready-made list of albums whose current files are below
//! their quality profile's cutoff (`wanted/cutoff`). When an upgrade budget
//! is configured we walk that list the same way the missing pass walks its
//! candidates: non-repeating selection, refresh, then an AlbumSearch for a
//! better copy. Disabled by default (`HUNT_UPGRADE_ALBUMS=0`).

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::hunt::candidates::{Candidate, Target};
use crate::hunt::cycle::{CycleReport, send_accepted};
use crate::hunt::selector::Selection;
use crate::lidarr::{ApiError, CommandRequest, LidarrApi};

const CUTOFF_PAGE_SIZE: u32 = 100;
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Run one upgrade cycle over cutoff-unmet albums.
pub async fn run_upgrade_cycle<A: LidarrApi + ?Sized>(api: &A, config: &Config) -> CycleReport {
    info!("=== Checking for album quality upgrades (cutoff unmet) ===");

    let candidates = match collect_cutoff(api, config).await {
        Ok(candidates) => candidates,
        Err(e) => {
            error!(error = %e, "Unable to retrieve cutoff-unmet albums");
            Vec::new()
        }
    };

    let mut report = CycleReport {
        candidates: candidates.len(),
        ..CycleReport::default()
    };

    if candidates.is_empty() {
        info!("No albums below cutoff, no upgrades needed");
        return report;
    }
    info!(count = candidates.len(), "Found album(s) needing upgrade");

    let mut selection = Selection::new();
    while report.processed < config.upgrade_items {
        let Some(candidate) = selection.pick(&candidates, config.random_selection) else {
            info!("All upgrade candidates visited this cycle");
            break;
        };

        info!(
            artist = %candidate.artist_name,
            title = candidate.title.as_deref().unwrap_or(""),
            "Upgrading album"
        );

        let refreshed =
            send_accepted(api, &CommandRequest::refresh_artist(candidate.artist_id)).await;
        if refreshed.is_none() {
            warn!(artist = %candidate.artist_name, "Refresh rejected, skipping album");
            report.skipped += 1;
            sleep(config.failure_backoff).await;
            continue;
        }
        sleep(config.refresh_delay).await;

        let Target::Album { album_id } = candidate.target else {
            continue;
        };
        match send_accepted(api, &CommandRequest::album_search(album_id)).await {
            Some(command_id) => {
                report.processed += 1;
                info!(
                    command_id,
                    processed = report.processed,
                    max = config.upgrade_items,
                    "Upgrade search accepted, throttling"
                );
                sleep(config.item_sleep).await;
            }
            None => {
                warn!(album_id, "Upgrade search rejected, moving on");
                report.skipped += 1;
                sleep(config.failure_backoff).await;
            }
        }
    }

    report
}

/// Page the cutoff-unmet list into upgrade candidates.
async fn collect_cutoff<A: LidarrApi + ?Sized>(
    api: &A,
    config: &Config,
) -> Result<Vec<Candidate>, ApiError> {
    let page = api.wanted_cutoff(1, CUTOFF_PAGE_SIZE).await?;

    Ok(page
        .records
        .into_iter()
        .filter(|record| !config.monitored_only || record.monitored)
        .filter_map(|record| {
            // Records without an embedded artist can't be refreshed
            let artist = record.artist?;
            Some(Candidate {
                artist_id: artist.id,
                artist_name: artist
                    .artist_name
                    .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                title: record.title,
                missing: 0,
                target: Target::Album {
                    album_id: record.id,
                },
            })
        })
        .collect())
}
