//! Trait seam for the Lidarr API.
//!
//! The hunt loop is written against [`LidarrApi`] rather than the concrete
//! client so tests can drive whole cycles with a scripted in-memory double
//! and assert exactly which commands were sent.

use async_trait::async_trait;

use super::ApiError;
use super::client::LidarrClient;
use super::dto::{
    AlbumResource, ArtistResource, CommandRequest, CommandResponse, CutoffPage, TrackResource,
};

/// The slice of Lidarr's API the hunter uses.
#[async_trait]
pub trait LidarrApi: Send + Sync {
    /// List every artist in the library.
    async fn artists(&self) -> Result<Vec<ArtistResource>, ApiError>;

    /// List all albums belonging to one artist.
    async fn albums_for_artist(&self, artist_id: i64) -> Result<Vec<AlbumResource>, ApiError>;

    /// List all tracks on one album.
    async fn tracks_for_album(&self, album_id: i64) -> Result<Vec<TrackResource>, ApiError>;

    /// One page of albums below their quality cutoff.
    async fn wanted_cutoff(&self, page: u32, page_size: u32) -> Result<CutoffPage, ApiError>;

    /// Queue a named command.
    async fn send_command(&self, request: &CommandRequest) -> Result<CommandResponse, ApiError>;
}

#[async_trait]
impl LidarrApi for LidarrClient {
    async fn artists(&self) -> Result<Vec<ArtistResource>, ApiError> {
        self.artists().await
    }

    async fn albums_for_artist(&self, artist_id: i64) -> Result<Vec<AlbumResource>, ApiError> {
        self.albums_for_artist(artist_id).await
    }

    async fn tracks_for_album(&self, album_id: i64) -> Result<Vec<TrackResource>, ApiError> {
        self.tracks_for_album(album_id).await
    }

    async fn wanted_cutoff(&self, page: u32, page_size: u32) -> Result<CutoffPage, ApiError> {
        self.wanted_cutoff(page, page_size).await
    }

    async fn send_command(&self, request: &CommandRequest) -> Result<CommandResponse, ApiError> {
        self.send_command(request).await
    }
}

/// Scripted Lidarr double for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::lidarr::dto::Statistics;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// In-memory Lidarr that records every command it receives.
    ///
    /// Commands whose name is in `reject` come back without an id (the
    /// "rejected" shape); everything else is accepted with a fresh id.
    pub struct MockLidarr {
        pub artists: Result<Vec<ArtistResource>, ApiError>,
        pub albums: HashMap<i64, Vec<AlbumResource>>,
        pub tracks: HashMap<i64, Vec<TrackResource>>,
        pub cutoff: CutoffPage,
        pub reject: HashSet<&'static str>,
        pub sent: Mutex<Vec<CommandRequest>>,
        next_id: AtomicI64,
    }

    impl MockLidarr {
        pub fn empty() -> Self {
            Self {
                artists: Ok(vec![]),
                albums: HashMap::new(),
                tracks: HashMap::new(),
                cutoff: CutoffPage {
                    page: 1,
                    page_size: 100,
                    total_records: 0,
                    records: vec![],
                },
                reject: HashSet::new(),
                sent: Mutex::new(vec![]),
                next_id: AtomicI64::new(1),
            }
        }

        pub fn with_artists(artists: Vec<ArtistResource>) -> Self {
            Self {
                artists: Ok(artists),
                ..Self::empty()
            }
        }

        pub fn unreachable() -> Self {
            Self {
                artists: Err(ApiError::Network("connection refused".to_string())),
                ..Self::empty()
            }
        }

        /// Reject every command with the given name.
        pub fn rejecting(mut self, name: &'static str) -> Self {
            self.reject.insert(name);
            self
        }

        /// Names of all commands sent so far, in order.
        pub fn sent_names(&self) -> Vec<&'static str> {
            self.sent.lock().unwrap().iter().map(|c| c.name).collect()
        }

        pub fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LidarrApi for MockLidarr {
        async fn artists(&self) -> Result<Vec<ArtistResource>, ApiError> {
            self.artists.clone()
        }

        async fn albums_for_artist(&self, artist_id: i64) -> Result<Vec<AlbumResource>, ApiError> {
            Ok(self.albums.get(&artist_id).cloned().unwrap_or_default())
        }

        async fn tracks_for_album(&self, album_id: i64) -> Result<Vec<TrackResource>, ApiError> {
            Ok(self.tracks.get(&album_id).cloned().unwrap_or_default())
        }

        async fn wanted_cutoff(&self, _page: u32, _page_size: u32) -> Result<CutoffPage, ApiError> {
            Ok(self.cutoff.clone())
        }

        async fn send_command(
            &self,
            request: &CommandRequest,
        ) -> Result<CommandResponse, ApiError> {
            self.sent.lock().unwrap().push(request.clone());

            if self.reject.contains(request.name) {
                return Ok(CommandResponse {
                    id: None,
                    name: Some(request.name.to_string()),
                    status: None,
                });
            }

            Ok(CommandResponse {
                id: Some(self.next_id.fetch_add(1, Ordering::SeqCst)),
                name: Some(request.name.to_string()),
                status: Some("queued".to_string()),
            })
        }
    }

    // Fixture builders shared by the hunt tests

    pub fn artist(id: i64, name: &str, monitored: bool, tracks: u32, files: u32) -> ArtistResource {
        ArtistResource {
            id,
            artist_name: Some(name.to_string()),
            monitored,
            statistics: Statistics {
                track_count: tracks,
                track_file_count: files,
            },
        }
    }

    pub fn album(
        id: i64,
        artist_id: i64,
        title: &str,
        monitored: bool,
        tracks: u32,
        files: u32,
    ) -> AlbumResource {
        AlbumResource {
            id,
            title: Some(title.to_string()),
            monitored,
            artist_id,
            statistics: Statistics {
                track_count: tracks,
                track_file_count: files,
            },
        }
    }

    pub fn track(
        id: i64,
        album_id: i64,
        artist_id: i64,
        title: &str,
        monitored: bool,
        has_file: bool,
    ) -> TrackResource {
        TrackResource {
            id,
            title: Some(title.to_string()),
            monitored,
            has_file,
            album_id,
            artist_id,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_accepts_by_default() {
            let mock = MockLidarr::empty();
            let resp = mock
                .send_command(&CommandRequest::refresh_artist(1))
                .await
                .unwrap();
            assert!(resp.accepted());
            assert_eq!(mock.sent_names(), vec!["RefreshArtist"]);
        }

        #[tokio::test]
        async fn test_mock_rejects_named_commands() {
            let mock = MockLidarr::empty().rejecting("MissingAlbumSearch");
            let resp = mock
                .send_command(&CommandRequest::missing_album_search(1))
                .await
                .unwrap();
            assert!(!resp.accepted());
        }

        #[tokio::test]
        async fn test_mock_unreachable() {
            let mock = MockLidarr::unreachable();
            assert!(matches!(mock.artists().await, Err(ApiError::Network(_))));
        }
    }
}
