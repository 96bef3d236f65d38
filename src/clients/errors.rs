use chrono::NaiveDate;
use rspotify::ClientError;
use rspotify::model::IdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("Invalid Spotify id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("No previous month for date {0}")]
    DateOutOfRange(NaiveDate),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
