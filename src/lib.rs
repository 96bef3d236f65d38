//! Rcurator - Roll a monthly Spotify playlist into long-lived playlists
//!
//! Every month the tracks collected in a playlist named after the month
//! (`March 2024`) get appended to a month playlist (`MARCH`), a year
//! playlist (`2024`) and an all-time playlist.

/// Client modules for interacting with the streaming service
pub mod clients;
/// Playlist roll-up workflow
pub mod organizer;
/// Calendar period the roll-up targets
pub mod period;
