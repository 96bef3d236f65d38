use std::path::PathBuf;

use log::debug;

use crate::clients::{
    entities::{Page, Playlist, Track},
    errors::{Error, Result},
    service::PlaylistService,
};
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth,
    model::{
        EpisodeId, PlayableId, PlaylistId, PlaylistItem, SimplifiedPlaylist, TrackId,
    },
    prelude::*,
    scopes,
};

impl From<SimplifiedPlaylist> for Playlist {
    fn from(p: SimplifiedPlaylist) -> Playlist {
        Playlist {
            id: p.id.id().to_string(),
            name: p.name,
        }
    }
}

// Local files and removed tracks have no id and so no addressable URI
fn track_from_item(item: &PlaylistItem) -> Option<Track> {
    let id = item.track.as_ref()?.id()?;
    Some(Track { uri: id.uri() })
}

fn playable_id(uri: &str) -> Result<PlayableId<'_>> {
    if uri.starts_with("spotify:episode:") {
        Ok(PlayableId::Episode(EpisodeId::from_uri(uri)?))
    } else {
        Ok(PlayableId::Track(TrackId::from_uri(uri)?))
    }
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Authorize the Spotify client from the token cache, or via CLI prompt and OAuth flow
    // This function requires the `cli` feature enabled.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        self.spotify.prompt_for_token(&url).await?;
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(())
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let creds = Credentials::from_env()
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify credentials, set RSPOTIFY_CLIENT_ID and RSPOTIFY_CLIENT_SECRET.".into()))?;
        let oauth = OAuth::from_env(scopes!(
            "playlist-modify-public",
            "playlist-modify-private",
            "playlist-read-private"
        ))
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify OAuth configuration, set RSPOTIFY_REDIRECT_URI.".into()))?;

        let cache_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".rcurator_token_cache");

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                cache_path,
                ..Default::default()
            },
        );

        Ok(Self { spotify })
    }
}

impl PlaylistService for SpotifyClient {
    async fn playlists_page(&self, limit: u32, offset: u32) -> Result<Page<Playlist>> {
        let page = self
            .spotify
            .current_user_playlists_manual(Some(limit), Some(offset))
            .await?;
        Ok(Page {
            total: page.total,
            items: page.items.into_iter().map(Playlist::from).collect(),
        })
    }

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Option<Track>>> {
        let id = PlaylistId::from_id(playlist_id)?;
        let page = self
            .spotify
            .playlist_items_manual(id, None, None, Some(limit), Some(offset))
            .await?;
        Ok(Page {
            total: page.total,
            items: page.items.iter().map(track_from_item).collect(),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, track_uris: &[String]) -> Result<()> {
        let id = PlaylistId::from_id(playlist_id)?;
        let items = track_uris
            .iter()
            .map(|uri| playable_id(uri))
            .collect::<Result<Vec<_>>>()?;
        let snapshot = self.spotify.playlist_add_items(id, items, None).await?;
        debug!("Playlist {playlist_id} now at snapshot {}", snapshot.snapshot_id);
        Ok(())
    }
}
