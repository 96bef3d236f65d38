//! In-memory playlist service used by the workflow tests.

use std::sync::Mutex;

use rcurator::clients::PlaylistService;
use rcurator::clients::entities::{Page, Playlist, Track};
use rcurator::clients::errors::Result;

pub struct FakePlaylist {
    pub playlist: Playlist,
    pub entries: Vec<Option<Track>>,
}

#[derive(Default)]
pub struct FakeService {
    playlists: Mutex<Vec<FakePlaylist>>,
    /// (playlist id, batch) for every add request, in call order
    pub writes: Mutex<Vec<(String, Vec<String>)>>,
    pub playlist_page_calls: Mutex<u32>,
    pub track_page_calls: Mutex<u32>,
    /// Total reported on every page instead of the real length
    reported_total: Option<u32>,
}

pub fn uri(n: usize) -> String {
    format!("spotify:track:{n:022}")
}

pub fn uris(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(uri).collect()
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(self, name: &str, track_uris: Vec<String>) -> Self {
        let entries = track_uris.into_iter().map(|uri| Some(Track { uri })).collect();
        self.with_entries(name, entries)
    }

    pub fn with_entries(self, name: &str, entries: Vec<Option<Track>>) -> Self {
        {
            let mut playlists = self.playlists.lock().unwrap();
            let id = format!("pl{}", playlists.len());
            playlists.push(FakePlaylist {
                playlist: Playlist {
                    id,
                    name: name.to_string(),
                },
                entries,
            });
        }
        self
    }

    /// Report `total` on every page, whatever the listing really holds
    pub fn with_reported_total(mut self, total: u32) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Numbered filler playlists so lookups have to page
    pub fn with_filler(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.with_playlist(&format!("Filler {i}"), Vec::new());
        }
        self
    }

    pub fn id_of(&self, name: &str) -> String {
        self.playlists
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.playlist.name == name)
            .map(|p| p.playlist.id.clone())
            .unwrap()
    }

    pub fn written_to(&self, playlist_id: &str) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == playlist_id)
            .flat_map(|(_, batch)| batch.clone())
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

fn page_of<T: Clone>(all: &[T], limit: u32, offset: u32, reported_total: Option<u32>) -> Page<T> {
    let start = (offset as usize).min(all.len());
    let end = (start + limit as usize).min(all.len());
    Page {
        items: all[start..end].to_vec(),
        total: reported_total.unwrap_or_else(|| u32::try_from(all.len()).unwrap()),
    }
}

impl PlaylistService for FakeService {
    async fn playlists_page(&self, limit: u32, offset: u32) -> Result<Page<Playlist>> {
        *self.playlist_page_calls.lock().unwrap() += 1;
        let all: Vec<Playlist> = self
            .playlists
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.playlist.clone())
            .collect();
        Ok(page_of(&all, limit, offset, self.reported_total))
    }

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Option<Track>>> {
        *self.track_page_calls.lock().unwrap() += 1;
        let playlists = self.playlists.lock().unwrap();
        let entries = playlists
            .iter()
            .find(|p| p.playlist.id == playlist_id)
            .map(|p| p.entries.clone())
            .unwrap_or_default();
        Ok(page_of(&entries, limit, offset, self.reported_total))
    }

    async fn add_tracks(&self, playlist_id: &str, track_uris: &[String]) -> Result<()> {
        let mut playlists = self.playlists.lock().unwrap();
        if let Some(p) = playlists.iter_mut().find(|p| p.playlist.id == playlist_id) {
            p.entries
                .extend(track_uris.iter().map(|uri| Some(Track { uri: uri.clone() })));
        }
        self.writes
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), track_uris.to_vec()));
        Ok(())
    }
}
