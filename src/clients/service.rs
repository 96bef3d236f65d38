use std::future::Future;

use crate::clients::{
    entities::{Page, Playlist, Track},
    errors::Result,
};

/// Remote playlist capabilities the organizer relies on.
///
/// [`SpotifyClient`](crate::clients::SpotifyClient) is the production
/// implementation; tests plug in an in-memory one.
pub trait PlaylistService: Send + Sync {
    /// One page of the current user's playlists.
    fn playlists_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Page<Playlist>>> + Send;

    /// One page of a playlist's entries. Entries without a usable URI
    /// (removed or local tracks) come back as `None`.
    fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Page<Option<Track>>>> + Send;

    /// Append a single batch of track URIs to the end of a playlist.
    fn add_tracks(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> impl Future<Output = Result<()>> + Send;
}
