//! Lidarr HTTP client
//!
//! Thin wrapper over the Lidarr v1 REST API. Authentication is a single
//! static `X-Api-Key` header; everything is plain JSON. Requests carry a
//! 30 second timeout so a wedged server can't stall the hunt loop forever.

use serde::de::DeserializeOwned;
use std::time::Duration;

use super::ApiError;
use super::dto;

/// User agent sent with every request
const USER_AGENT: &str = concat!("LidarrHunter/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Lidarr API client
pub struct LidarrClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LidarrClient {
    /// Create a client for the given server.
    ///
    /// A trailing slash on the base URL is tolerated and stripped.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// List every artist in the library
    pub async fn artists(&self) -> Result<Vec<dto::ArtistResource>, ApiError> {
        self.get("artist").await
    }

    /// List all albums belonging to one artist
    pub async fn albums_for_artist(
        &self,
        artist_id: i64,
    ) -> Result<Vec<dto::AlbumResource>, ApiError> {
        self.get(&format!("album?artistId={artist_id}")).await
    }

    /// List all tracks on one album
    pub async fn tracks_for_album(
        &self,
        album_id: i64,
    ) -> Result<Vec<dto::TrackResource>, ApiError> {
        self.get(&format!("track?albumId={album_id}")).await
    }

    /// One page of albums whose quality is below the profile cutoff
    pub async fn wanted_cutoff(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<dto::CutoffPage, ApiError> {
        self.get(&format!("wanted/cutoff?page={page}&pageSize={page_size}"))
            .await
    }

    /// Queue a named command (RefreshArtist, MissingAlbumSearch, ...)
    pub async fn send_command(
        &self,
        request: &dto::CommandRequest,
    ) -> Result<dto::CommandResponse, ApiError> {
        let url = format!("{}/api/v1/command", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}/api/v1/{}", self.base_url, endpoint);
        let response = self
            .http_client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Map status codes to errors, then parse the body
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited);
    }

    if !status.is_success() {
        let message = status.canonical_reason().unwrap_or("Unknown").to_string();
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
