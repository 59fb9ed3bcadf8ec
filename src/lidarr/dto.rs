//! Lidarr API Data Transfer Objects
//!
//! These types match EXACTLY what the Lidarr v1 API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the lidarr module's callers - the hunt
//! layer converts them into its own candidate type.
//!
//! We use the `artist`, `album`, `track` and `wanted/cutoff` list endpoints
//! plus the generic `command` endpoint.

use serde::{Deserialize, Serialize};

/// Track-count statistics block embedded in artist and album resources
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    /// Tracks Lidarr expects to exist
    pub track_count: u32,
    /// Tracks actually present on disk
    pub track_file_count: u32,
}

/// One artist from `GET /api/v1/artist`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResource {
    pub id: i64,
    /// Display name
    pub artist_name: Option<String>,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub statistics: Statistics,
}

/// One album from `GET /api/v1/album?artistId=`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResource {
    pub id: i64,
    pub title: Option<String>,
    #[serde(default)]
    pub monitored: bool,
    /// Parent artist
    pub artist_id: i64,
    #[serde(default)]
    pub statistics: Statistics,
}

/// One track from `GET /api/v1/track?albumId=`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResource {
    pub id: i64,
    pub title: Option<String>,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub has_file: bool,
    pub album_id: i64,
    pub artist_id: i64,
}

/// One page of `GET /api/v1/wanted/cutoff`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutoffPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_records: u32,
    #[serde(default)]
    pub records: Vec<CutoffRecord>,
}

/// Album below its quality cutoff, with the artist embedded
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutoffRecord {
    pub id: i64,
    pub title: Option<String>,
    #[serde(default)]
    pub monitored: bool,
    pub artist: Option<CutoffArtist>,
}

/// Artist summary inside a cutoff record
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutoffArtist {
    pub id: i64,
    pub artist_name: Option<String>,
}

/// Payload for `POST /api/v1/command`.
///
/// Lidarr dispatches on `name`; the id arrays it expects differ per command,
/// so absent arrays must be omitted from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_ids: Option<Vec<i64>>,
}

impl CommandRequest {
    fn bare(name: &'static str) -> Self {
        Self {
            name,
            artist_ids: None,
            album_ids: None,
            track_ids: None,
        }
    }

    /// Re-scan an artist's metadata before searching
    pub fn refresh_artist(artist_id: i64) -> Self {
        Self {
            artist_ids: Some(vec![artist_id]),
            ..Self::bare("RefreshArtist")
        }
    }

    /// Search every missing album of an artist
    pub fn missing_album_search(artist_id: i64) -> Self {
        Self {
            artist_ids: Some(vec![artist_id]),
            ..Self::bare("MissingAlbumSearch")
        }
    }

    /// Search one specific album
    pub fn album_search(album_id: i64) -> Self {
        Self {
            album_ids: Some(vec![album_id]),
            ..Self::bare("AlbumSearch")
        }
    }

    /// Search all albums of an artist (fallback variant)
    pub fn album_search_by_artist(artist_id: i64) -> Self {
        Self {
            artist_ids: Some(vec![artist_id]),
            ..Self::bare("AlbumSearch")
        }
    }

    /// Search one specific track
    pub fn track_search(track_id: i64) -> Self {
        Self {
            track_ids: Some(vec![track_id]),
            ..Self::bare("TrackSearch")
        }
    }
}

/// Response to a command POST.
///
/// Accepted iff `id` is present; Lidarr error bodies come back without one.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub status: Option<String>,
}

impl CommandResponse {
    /// Whether Lidarr queued the command
    pub fn accepted(&self) -> bool {
        self.id.is_some()
    }
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_artist_with_statistics() {
        let json = r#"{
            "id": 42,
            "artistName": "Queen",
            "monitored": true,
            "statistics": {
                "albumCount": 15,
                "trackCount": 180,
                "trackFileCount": 172,
                "sizeOnDisk": 123456789
            }
        }"#;

        let artist: ArtistResource = serde_json::from_str(json).expect("Should parse artist");
        assert_eq!(artist.id, 42);
        assert_eq!(artist.artist_name.as_deref(), Some("Queen"));
        assert!(artist.monitored);
        assert_eq!(artist.statistics.track_count, 180);
        assert_eq!(artist.statistics.track_file_count, 172);
    }

    #[test]
    fn test_parse_artist_without_statistics() {
        // Freshly added artists can come back before stats are computed
        let json = r#"{"id": 7, "artistName": "New Artist"}"#;

        let artist: ArtistResource = serde_json::from_str(json).expect("Should parse bare artist");
        assert!(!artist.monitored);
        assert_eq!(artist.statistics.track_count, 0);
        assert_eq!(artist.statistics.track_file_count, 0);
    }

    #[test]
    fn test_parse_album() {
        let json = r#"{
            "id": 301,
            "title": "A Night at the Opera",
            "monitored": true,
            "artistId": 42,
            "albumType": "Album",
            "statistics": {"trackCount": 12, "trackFileCount": 9}
        }"#;

        let album: AlbumResource = serde_json::from_str(json).expect("Should parse album");
        assert_eq!(album.artist_id, 42);
        assert_eq!(album.statistics.track_count, 12);
        assert_eq!(album.statistics.track_file_count, 9);
    }

    #[test]
    fn test_parse_track() {
        let json = r#"{
            "id": 9001,
            "title": "Bohemian Rhapsody",
            "monitored": true,
            "hasFile": false,
            "albumId": 301,
            "artistId": 42,
            "trackNumber": "11"
        }"#;

        let track: TrackResource = serde_json::from_str(json).expect("Should parse track");
        assert_eq!(track.id, 9001);
        assert!(!track.has_file);
        assert_eq!(track.album_id, 301);
        assert_eq!(track.artist_id, 42);
    }

    #[test]
    fn test_parse_command_response() {
        let json = r#"{"id": 5150, "name": "RefreshArtist", "status": "queued"}"#;

        let resp: CommandResponse = serde_json::from_str(json).expect("Should parse command");
        assert!(resp.accepted());
        assert_eq!(resp.id, Some(5150));
        assert_eq!(resp.status.as_deref(), Some("queued"));
    }

    #[test]
    fn test_command_response_without_id_is_rejected() {
        let json = r#"{"message": "Unknown command"}"#;

        let resp: CommandResponse = serde_json::from_str(json).expect("Should parse error body");
        assert!(!resp.accepted());
    }

    #[test]
    fn test_parse_cutoff_page() {
        let json = r#"{
            "page": 1,
            "pageSize": 100,
            "totalRecords": 2,
            "records": [
                {
                    "id": 301,
                    "title": "A Night at the Opera",
                    "monitored": true,
                    "artist": {"id": 42, "artistName": "Queen"}
                },
                {"id": 302, "title": "Jazz", "monitored": false, "artist": null}
            ]
        }"#;

        let page: CutoffPage = serde_json::from_str(json).expect("Should parse cutoff page");
        assert_eq!(page.total_records, 2);
        assert_eq!(page.records.len(), 2);
        assert_eq!(
            page.records[0]
                .artist
                .as_ref()
                .and_then(|a| a.artist_name.as_deref()),
            Some("Queen")
        );
        assert!(page.records[1].artist.is_none());
    }

    #[test]
    fn test_command_request_serializes_only_relevant_ids() {
        let refresh = CommandRequest::refresh_artist(42);
        let json = serde_json::to_value(&refresh).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "RefreshArtist", "artistIds": [42]})
        );

        let search = CommandRequest::album_search(301);
        let json = serde_json::to_value(&search).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "AlbumSearch", "albumIds": [301]})
        );

        let fallback = CommandRequest::album_search_by_artist(42);
        let json = serde_json::to_value(&fallback).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "AlbumSearch", "artistIds": [42]})
        );

        let track = CommandRequest::track_search(9001);
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "TrackSearch", "trackIds": [9001]})
        );
    }
}
