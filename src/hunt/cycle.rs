//! One hunt cycle: collect, pick, refresh, search.
//!
//! Per chosen item the sequence is RefreshArtist, a short settle delay, then
//! the mode-appropriate search command. A rejected refresh skips the item
//! (with a backoff) without counting it as processed; a rejected primary
//! search gets exactly one fallback attempt and counts either way. No
//! failure aborts the cycle - the outer loop re-collects fresh state after
//! the cooldown anyway.

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::hunt::candidates::{self, Candidate, Target};
use crate::hunt::selector::Selection;
use crate::lidarr::{CommandRequest, LidarrApi};

/// What one cycle accomplished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Candidates found by the collection step
    pub candidates: usize,
    /// Items that got through refresh + search
    pub processed: u32,
    /// Items skipped because their refresh was rejected
    pub skipped: u32,
}

enum ItemOutcome {
    Processed,
    Skipped,
}

/// Run one missing-content cycle.
///
/// Processes up to `config.max_items` candidates or until the list is
/// exhausted. An unreachable server or an empty library simply yields an
/// empty report; the caller cools down and re-collects.
pub async fn run_missing_cycle<A: LidarrApi + ?Sized>(api: &A, config: &Config) -> CycleReport {
    info!(mode = %config.mode, "=== Starting hunt cycle ===");

    let candidates = match candidates::collect(api, config).await {
        Ok(candidates) => candidates,
        Err(e) => {
            error!(error = %e, "Unable to retrieve library data");
            Vec::new()
        }
    };

    let mut report = CycleReport {
        candidates: candidates.len(),
        ..CycleReport::default()
    };

    if candidates.is_empty() {
        info!("No incomplete items found");
        return report;
    }
    info!(count = candidates.len(), "Found incomplete item(s)");

    let mut selection = Selection::new();
    while report.processed < config.max_items {
        let Some(candidate) = selection.pick(&candidates, config.random_selection) else {
            info!("All candidates visited this cycle");
            break;
        };

        match hunt_one(api, config, candidate).await {
            ItemOutcome::Processed => {
                report.processed += 1;
                info!(
                    processed = report.processed,
                    max = config.max_items,
                    sleep_secs = config.item_sleep.as_secs(),
                    "Item processed, throttling"
                );
                sleep(config.item_sleep).await;
            }
            ItemOutcome::Skipped => {
                report.skipped += 1;
                sleep(config.failure_backoff).await;
            }
        }
    }

    report
}

/// Refresh-then-search for a single candidate.
async fn hunt_one<A: LidarrApi + ?Sized>(
    api: &A,
    config: &Config,
    candidate: &Candidate,
) -> ItemOutcome {
    info!(
        artist = %candidate.artist_name,
        title = candidate.title.as_deref().unwrap_or(""),
        missing = candidate.missing,
        "Processing candidate"
    );

    let Some(command_id) = send_accepted(api, &CommandRequest::refresh_artist(candidate.artist_id)).await
    else {
        warn!(artist = %candidate.artist_name, "Refresh rejected, skipping item");
        return ItemOutcome::Skipped;
    };
    info!(command_id, "Refresh accepted");
    sleep(config.refresh_delay).await;

    let (primary, fallback) = search_commands(candidate);
    match send_accepted(api, &primary).await {
        Some(command_id) => {
            info!(command_id, command = primary.name, "Search accepted");
        }
        None => {
            warn!(command = primary.name, "Search rejected, trying fallback");
            match send_accepted(api, &fallback).await {
                Some(command_id) => {
                    info!(command_id, command = fallback.name, "Fallback search accepted");
                }
                None => {
                    warn!(command = fallback.name, "Fallback search also rejected, moving on");
                }
            }
        }
    }

    ItemOutcome::Processed
}

/// The primary search command for a candidate plus its fallback variant.
fn search_commands(candidate: &Candidate) -> (CommandRequest, CommandRequest) {
    match candidate.target {
        Target::Artist => (
            CommandRequest::missing_album_search(candidate.artist_id),
            CommandRequest::album_search_by_artist(candidate.artist_id),
        ),
        Target::Album { album_id } => (
            CommandRequest::album_search(album_id),
            CommandRequest::missing_album_search(candidate.artist_id),
        ),
        Target::Track { track_id, album_id } => (
            CommandRequest::track_search(track_id),
            CommandRequest::album_search(album_id),
        ),
    }
}

/// Send a command; `Some(id)` iff Lidarr accepted it.
///
/// Transport errors and id-less responses both count as rejection - callers
/// only care whether the command was queued.
pub(crate) async fn send_accepted<A: LidarrApi + ?Sized>(
    api: &A,
    request: &CommandRequest,
) -> Option<i64> {
    match api.send_command(request).await {
        Ok(resp) if resp.accepted() => resp.id,
        Ok(_) => {
            warn!(command = request.name, "Command response carried no id");
            None
        }
        Err(e) => {
            warn!(command = request.name, error = %e, "Command request failed");
            None
        }
    }
}
