//! Lidarr API client module.
//!
//! # Architecture
//!
//! - **DTOs** (`dto.rs`) - Exact Lidarr v1 API response/request shapes
//! - **Client** (`client.rs`) - reqwest HTTP client, one API-key header
//! - **Traits** (`traits.rs`) - [`LidarrApi`] seam so the hunt loop can be
//!   driven against a scripted mock in tests
//!
//! The API is plain JSON over HTTP. A command POST is considered accepted
//! iff the response carries a command `id` field; everything else is treated
//! as a rejection by the callers.

pub mod client;
pub mod dto;
pub mod traits;

pub use client::LidarrClient;
pub use dto::{AlbumResource, ArtistResource, CommandRequest, CommandResponse, TrackResource};
pub use traits::LidarrApi;

/// Errors from talking to Lidarr.
///
/// Cloneable so scripted test doubles can replay the same failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Connection / transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Lidarr rejected the API key
    #[error("unauthorized: check API_KEY")]
    Unauthorized,

    /// 429 from the server
    #[error("rate limited by Lidarr")]
    RateLimited,

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("failed to parse response: {0}")]
    Parse(String),
}
