use thiserror::Error;

use atrk_core::TrackError;

/// Errors surfaced by `atrk` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Track(#[from] TrackError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
