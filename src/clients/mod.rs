/// Data entities for playlists and tracks
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Service port used by the workflow
pub mod service;
/// Spotify API client
pub mod spotify;

pub use service::PlaylistService;
pub use spotify::SpotifyClient;
