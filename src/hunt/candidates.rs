//! Candidate collection.
//!
//! Fetches the entity list for the configured hunt mode, applies the
//! monitored-only filter, and keeps only items that are actually missing
//! something on disk. The resulting list is rebuilt from scratch every
//! cycle; nothing is persisted.

use tracing::{debug, warn};

use crate::config::{Config, HuntMode};
use crate::lidarr::{ApiError, LidarrApi};

const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// What a candidate points at, beyond its artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Whole artist is incomplete
    Artist,
    /// One album is incomplete
    Album { album_id: i64 },
    /// One track has no file
    Track { track_id: i64, album_id: i64 },
}

/// An incomplete library item worth hunting this cycle.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub artist_id: i64,
    pub artist_name: String,
    /// Album or track title, when the target has one
    pub title: Option<String>,
    /// How many tracks are missing (1 for a track target)
    pub missing: u32,
    pub target: Target,
}

impl Candidate {
    /// Stable identity for the visited set.
    ///
    /// Keyed by entity id, not list position, so a pick can never alias a
    /// different item even if the candidate list were rebuilt.
    pub fn key(&self) -> i64 {
        match self.target {
            Target::Artist => self.artist_id,
            Target::Album { album_id } => album_id,
            Target::Track { track_id, .. } => track_id,
        }
    }
}

/// Candidate filter: an item is incomplete iff Lidarr expects more tracks
/// than exist on disk.
pub fn is_incomplete(track_count: u32, track_file_count: u32) -> bool {
    track_count > track_file_count
}

/// Collect candidates for the configured mode.
///
/// Failure of the top-level artist list propagates; failures of per-artist
/// or per-album sub-fetches are logged and skipped so one flaky request
/// doesn't empty the whole cycle.
pub async fn collect<A: LidarrApi + ?Sized>(
    api: &A,
    config: &Config,
) -> Result<Vec<Candidate>, ApiError> {
    match config.mode {
        HuntMode::Artist => collect_artists(api, config).await,
        HuntMode::Album => collect_albums(api, config).await,
        HuntMode::Song => collect_tracks(api, config).await,
    }
}

async fn collect_artists<A: LidarrApi + ?Sized>(
    api: &A,
    config: &Config,
) -> Result<Vec<Candidate>, ApiError> {
    let artists = api.artists().await?;

    Ok(artists
        .into_iter()
        .filter(|a| !config.monitored_only || a.monitored)
        .filter(|a| is_incomplete(a.statistics.track_count, a.statistics.track_file_count))
        .map(|a| Candidate {
            artist_id: a.id,
            artist_name: a.artist_name.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            title: None,
            missing: a.statistics.track_count - a.statistics.track_file_count,
            target: Target::Artist,
        })
        .collect())
}

async fn collect_albums<A: LidarrApi + ?Sized>(
    api: &A,
    config: &Config,
) -> Result<Vec<Candidate>, ApiError> {
    let artists = api.artists().await?;
    let mut candidates = Vec::new();

    for artist in artists {
        if config.monitored_only && !artist.monitored {
            continue;
        }
        let artist_name = artist
            .artist_name
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let albums = match api.albums_for_artist(artist.id).await {
            Ok(albums) => albums,
            Err(e) => {
                warn!(artist = %artist_name, error = %e, "Album listing failed, skipping artist");
                continue;
            }
        };

        for album in albums {
            if config.monitored_only && !album.monitored {
                continue;
            }
            if is_incomplete(
                album.statistics.track_count,
                album.statistics.track_file_count,
            ) {
                candidates.push(Candidate {
                    artist_id: artist.id,
                    artist_name: artist_name.clone(),
                    title: album.title,
                    missing: album.statistics.track_count - album.statistics.track_file_count,
                    target: Target::Album { album_id: album.id },
                });
            }
        }
    }

    Ok(candidates)
}

async fn collect_tracks<A: LidarrApi + ?Sized>(
    api: &A,
    config: &Config,
) -> Result<Vec<Candidate>, ApiError> {
    let artists = api.artists().await?;
    let mut candidates = Vec::new();

    for artist in artists {
        if config.monitored_only && !artist.monitored {
            continue;
        }
        let artist_name = artist
            .artist_name
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let albums = match api.albums_for_artist(artist.id).await {
            Ok(albums) => albums,
            Err(e) => {
                warn!(artist = %artist_name, error = %e, "Album listing failed, skipping artist");
                continue;
            }
        };

        for album in albums {
            if config.monitored_only && !album.monitored {
                continue;
            }

            let tracks = match api.tracks_for_album(album.id).await {
                Ok(tracks) => tracks,
                Err(e) => {
                    warn!(album_id = album.id, error = %e, "Track listing failed, skipping album");
                    continue;
                }
            };

            for track in tracks {
                if config.monitored_only && !track.monitored {
                    continue;
                }
                if !track.has_file {
                    candidates.push(Candidate {
                        artist_id: artist.id,
                        artist_name: artist_name.clone(),
                        title: track.title,
                        missing: 1,
                        target: Target::Track {
                            track_id: track.id,
                            album_id: album.id,
                        },
                    });
                }
            }
        }
    }

    debug!(count = candidates.len(), "Collected missing tracks");
    Ok(candidates)
}
