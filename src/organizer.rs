use std::collections::HashSet;

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::clients::{
    PlaylistService,
    entities::Playlist,
    errors::{Error, Result},
};
use crate::period::Period;

/// Page size when listing the user's playlists
pub const PLAYLIST_PAGE_SIZE: u32 = 50;
/// Page size when listing a playlist's tracks
pub const TRACK_PAGE_SIZE: u32 = 100;
/// Spotify accepts at most 100 items per add request
pub const MAX_BATCH_SIZE: usize = 100;
/// Name of the aggregate playlist every month is rolled into
pub const DEFAULT_ALL_TIME_PLAYLIST: &str = "Oh at all";

/// Find a playlist by name (case insensitive). First match wins.
pub async fn find_playlist_by_name<S: PlaylistService>(
    service: &S,
    name: &str,
) -> Result<Option<Playlist>> {
    let wanted = name.to_lowercase();
    let mut offset = 0;

    loop {
        let page = service.playlists_page(PLAYLIST_PAGE_SIZE, offset).await?;
        debug!(
            "Fetched {} playlists at offset {offset} of {}",
            page.items.len(),
            page.total
        );
        if page.items.is_empty() {
            return Ok(None);
        }

        if let Some(playlist) = page
            .items
            .into_iter()
            .find(|p| p.name.to_lowercase() == wanted)
        {
            return Ok(Some(playlist));
        }

        offset += PLAYLIST_PAGE_SIZE;
        if offset >= page.total {
            return Ok(None);
        }
    }
}

/// Collect the URIs of every track in a playlist, in playlist order.
pub async fn playlist_track_uris<S: PlaylistService>(
    service: &S,
    playlist_id: &str,
) -> Result<Vec<String>> {
    let mut uris = Vec::new();
    let mut skipped = 0;
    let mut offset = 0;

    loop {
        let page = service
            .playlist_tracks_page(playlist_id, TRACK_PAGE_SIZE, offset)
            .await?;
        if page.items.is_empty() {
            break;
        }

        for item in page.items {
            match item {
                Some(track) => uris.push(track.uri),
                None => skipped += 1,
            }
        }

        offset += TRACK_PAGE_SIZE;
        if offset >= page.total {
            break;
        }
    }

    if skipped > 0 {
        debug!("Skipped {skipped} entries without a track URI in playlist {playlist_id}");
    }
    Ok(uris)
}

/// Append tracks to a playlist in batches of at most [`MAX_BATCH_SIZE`].
/// Returns the number of batches written.
pub async fn add_tracks_in_batches<S: PlaylistService>(
    service: &S,
    playlist_id: &str,
    track_uris: &[String],
) -> Result<usize> {
    if track_uris.is_empty() {
        warn!("No tracks to add");
        return Ok(0);
    }

    let mut batches = 0;
    for batch in track_uris.chunks(MAX_BATCH_SIZE) {
        service.add_tracks(playlist_id, batch).await?;
        batches += 1;
        info!("Added batch of {} tracks to playlist", batch.len());
    }
    Ok(batches)
}

/// Which of the long-lived playlists a destination is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    /// `MARCH`
    Month,
    /// `2024`
    Year,
    /// The aggregate playlist
    AllTime,
}

/// What happened to one destination playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum DestinationOutcome {
    /// Tracks were appended
    Updated {
        /// Remote playlist id
        playlist_id: String,
        /// Number of tracks appended
        added: usize,
        /// Number of add requests issued
        batches: usize,
    },
    /// Dry run, nothing was written
    DryRun {
        /// Remote playlist id
        playlist_id: String,
        /// Number of tracks a real run would append
        would_add: usize,
    },
    /// No playlist with that name exists
    Missing,
}

/// Per destination entry of a [`RunReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationReport {
    /// Destination role
    pub kind: DestinationKind,
    /// Playlist name that was looked up
    pub name: String,
    /// Result of the lookup and write
    #[serde(flatten)]
    pub outcome: DestinationOutcome,
}

/// How far a run got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Source found and every destination processed
    Completed,
    /// No source playlist for the period
    SourceMissing,
    /// Source playlist has no tracks
    SourceEmpty,
}

/// Summary of a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Period that was rolled up
    pub period: Period,
    /// Source playlist name
    pub source: String,
    /// Number of track URIs read from the source
    pub tracks: usize,
    /// How far the run got
    pub status: RunStatus,
    /// One entry per destination, in processing order
    pub destinations: Vec<DestinationReport>,
}

impl RunReport {
    fn new(period: Period) -> Self {
        RunReport {
            source: period.source_playlist_name(),
            period,
            tracks: 0,
            status: RunStatus::Completed,
            destinations: Vec::new(),
        }
    }

    /// Destinations that could not be found
    pub fn missing(&self) -> impl Iterator<Item = &DestinationReport> {
        self.destinations
            .iter()
            .filter(|d| d.outcome == DestinationOutcome::Missing)
    }
}

/// Reject playlist names that are empty or whitespace only
pub fn validate_playlist_name(name: String) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::ConfigurationError(
            "All-time playlist name must not be empty".into(),
        ));
    }
    Ok(name)
}

// Configuration for the Organizer struct
pub struct Config<S> {
    pub service: S,
    pub period: Period,
    pub all_time_playlist: String,
    pub dry_run: bool,
    pub skip_existing: bool,
}

pub struct ConfigBuilder<S> {
    service: Option<S>,
    period: Option<Period>,
    all_time_playlist: Option<String>,
    dry_run: bool,
    skip_existing: bool,
}

impl<S: PlaylistService> Default for ConfigBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlaylistService> ConfigBuilder<S> {
    pub fn new() -> Self {
        Self {
            service: None,
            period: None, // Defaults to the month before today
            all_time_playlist: None,
            dry_run: false,
            skip_existing: false,
        }
    }

    #[must_use]
    pub fn service(mut self, service: S) -> Self {
        self.service = Some(service);
        self
    }

    #[must_use]
    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    #[must_use]
    pub fn all_time_playlist(mut self, name: impl Into<String>) -> Self {
        self.all_time_playlist = Some(name.into());
        self
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    pub fn build(self) -> Result<Config<S>> {
        let service = self
            .service
            .ok_or_else(|| Error::ConfigurationError("No playlist service configured".into()))?;
        let period = match self.period {
            Some(p) => p,
            None => Period::current()?,
        };
        let all_time_playlist = match self.all_time_playlist {
            Some(name) => validate_playlist_name(name)?,
            None => DEFAULT_ALL_TIME_PLAYLIST.to_string(),
        };
        Ok(Config {
            service,
            period,
            all_time_playlist,
            dry_run: self.dry_run,
            skip_existing: self.skip_existing,
        })
    }
}

// Rolls the source playlist of a period into the month, year and all-time playlists
pub struct Organizer<S> {
    config: Config<S>,
}

impl<S: PlaylistService> Organizer<S> {
    pub fn new(config: Config<S>) -> Self {
        Organizer { config }
    }

    pub fn config(&self) -> &Config<S> {
        &self.config
    }

    /// Destination names in processing order
    pub fn destinations(&self) -> [(DestinationKind, String); 3] {
        let period = &self.config.period;
        [
            (DestinationKind::Month, period.month_playlist_name()),
            (DestinationKind::Year, period.year_playlist_name()),
            (DestinationKind::AllTime, self.config.all_time_playlist.clone()),
        ]
    }

    pub async fn run(&self) -> Result<RunReport> {
        let period = &self.config.period;
        let mut report = RunReport::new(period.clone());
        info!("Processing playlists for {} {}", period.month, period.year);

        let service = &self.config.service;
        let source_name = period.source_playlist_name();
        let Some(source) = find_playlist_by_name(service, &source_name).await? else {
            error!("Source playlist '{source_name}' not found");
            report.status = RunStatus::SourceMissing;
            return Ok(report);
        };
        info!("Found source playlist: {} (ID: {})", source.name, source.id);

        let track_uris = playlist_track_uris(service, &source.id).await?;
        report.tracks = track_uris.len();
        info!("Found {} tracks in source playlist", track_uris.len());

        if track_uris.is_empty() {
            warn!("No tracks found in source playlist. Exiting.");
            report.status = RunStatus::SourceEmpty;
            return Ok(report);
        }

        for (kind, name) in self.destinations() {
            let outcome = self.update_destination(kind, &name, &track_uris).await?;
            report.destinations.push(DestinationReport { kind, name, outcome });
        }

        info!("Playlist organization completed successfully");
        Ok(report)
    }

    async fn update_destination(
        &self,
        kind: DestinationKind,
        name: &str,
        track_uris: &[String],
    ) -> Result<DestinationOutcome> {
        let service = &self.config.service;
        let Some(playlist) = find_playlist_by_name(service, name).await? else {
            // A missing destination must not stop the others
            error!("{kind:?} playlist '{name}' not found");
            return Ok(DestinationOutcome::Missing);
        };

        let pending = if self.config.skip_existing {
            let mut existing: HashSet<String> = playlist_track_uris(service, &playlist.id)
                .await?
                .into_iter()
                .collect();
            // Source duplicates are appended once
            let pending: Vec<String> = track_uris
                .iter()
                .filter(|uri| existing.insert((*uri).clone()))
                .cloned()
                .collect();
            info!(
                "Skipping {} of {} tracks already in playlist '{}'",
                track_uris.len() - pending.len(),
                track_uris.len(),
                playlist.name
            );
            pending
        } else {
            track_uris.to_vec()
        };

        if self.config.dry_run {
            info!(
                "Dry run: would add {} tracks to {kind:?} playlist: {}",
                pending.len(),
                playlist.name
            );
            return Ok(DestinationOutcome::DryRun {
                playlist_id: playlist.id,
                would_add: pending.len(),
            });
        }

        info!("Adding tracks to {kind:?} playlist: {}", playlist.name);
        let batches = add_tracks_in_batches(service, &playlist.id, &pending).await?;
        Ok(DestinationOutcome::Updated {
            playlist_id: playlist.id,
            added: pending.len(),
            batches,
        })
    }
}
