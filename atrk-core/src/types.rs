//! Shared types and error enum for atrk-core.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors produced by atrk-core.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("format error: {0}")]
    Format(String),
    #[error("truncated data: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("encoding error: {0}")]
    Encoding(String),
    #[error("invalid track {track_id}: {reason}")]
    InvalidTrack { track_id: u32, reason: String },
    #[error("config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackError>;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// One timestamped kinematic sample of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Feet.
    pub altitude: f64,
    /// Knots.
    pub speed: f64,
    /// Degrees in [0, 360).
    pub heading: f64,
}

// ---------------------------------------------------------------------------
// Track type
// ---------------------------------------------------------------------------

/// Direction of a track relative to the observing site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Incoming,
    Outgoing,
}

impl TrackType {
    /// Wire/string form: `incoming` or `outgoing`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackType::Incoming => "incoming",
            TrackType::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackType {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "incoming" => Ok(TrackType::Incoming),
            "outgoing" => Ok(TrackType::Outgoing),
            other => Err(TrackError::Format(format!("unknown track type {other:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

/// One aircraft's recorded position history plus static metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub track_id: u32,
    pub track_name: String,
    pub track_type: TrackType,
    /// Free text, matched case-sensitively against the engine table.
    pub aircraft_type: String,
    pub start_time: f64,
    pub end_time: f64,
    /// Seconds. Stored separately in the file, normally `end_time - start_time`.
    pub lifetime: f64,
    /// Time-ascending samples. May be empty.
    pub positions: Vec<Position>,
}

impl Track {
    /// Build a track, deriving `lifetime` from the time span.
    pub fn new(
        track_id: u32,
        track_name: impl Into<String>,
        track_type: TrackType,
        aircraft_type: impl Into<String>,
        start_time: f64,
        end_time: f64,
        positions: Vec<Position>,
    ) -> Self {
        Track {
            track_id,
            track_name: track_name.into(),
            track_type,
            aircraft_type: aircraft_type.into(),
            start_time,
            end_time,
            lifetime: end_time - start_time,
            positions,
        }
    }

    /// Reject tracks whose time metadata cannot be tagged meaningfully.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| TrackError::InvalidTrack {
            track_id: self.track_id,
            reason,
        };
        if self.end_time < self.start_time {
            return Err(invalid(format!(
                "end_time {} precedes start_time {}",
                self.end_time, self.start_time
            )));
        }
        if !self.lifetime.is_finite() {
            return Err(invalid(format!("non-finite lifetime {}", self.lifetime)));
        }
        if self.lifetime < 0.0 {
            return Err(invalid(format!("negative lifetime {}", self.lifetime)));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn first_position(&self) -> Option<&Position> {
        self.positions.first()
    }

    pub fn last_position(&self) -> Option<&Position> {
        self.positions.last()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
