//! File output: binary track files, tagged CSV, tagged JSON.
//!
//! Every writer goes through a temporary sibling file that is renamed into
//! place, so an interrupted export never leaves a partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;

use atrk_core::codec;
use atrk_core::{FeatureSummary, TagSet, Track, TrackTags};

use crate::error::Result;

/// Column holding the joined tag string.
pub const TAG_COLUMN: &str = "ai_generated_tags";

// ---------------------------------------------------------------------------
// Atomic write
// ---------------------------------------------------------------------------

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Run `write` against a temporary path, then rename it over `path`.
fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let tmp = temp_path(path);
    if let Err(e) = write(&tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

pub fn read_tracks(path: &Path) -> Result<Vec<Track>> {
    let data = fs::read(path)?;
    let tracks = codec::decode(&data)?;
    log::info!("read {} tracks from {}", tracks.len(), path.display());
    Ok(tracks)
}

pub fn write_tracks(path: &Path, tracks: &[Track]) -> Result<()> {
    let data = codec::encode(tracks)?;
    write_atomic(path, |tmp| Ok(fs::write(tmp, &data)?))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// ISO-8601 UTC rendering of epoch seconds; empty when not representable.
pub fn iso_time(ts: f64) -> String {
    if !ts.is_finite() {
        return String::new();
    }
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// One flattened position row. Tracks without positions get a single row
/// with the position columns left empty.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    track_id: u32,
    track_name: &'a str,
    track_type: &'a str,
    aircraft_type: &'a str,
    track_start_time: String,
    track_end_time: String,
    lifetime: f64,
    timestamp: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<f64>,
    speed: Option<f64>,
    heading: Option<f64>,
    ai_generated_tags: &'a str,
}

pub fn write_csv(path: &Path, tracks: &[Track], results: &[TrackTags]) -> Result<()> {
    write_atomic(path, |tmp| {
        let mut wtr = csv::Writer::from_path(tmp)?;
        for (track, tagged) in tracks.iter().zip(results) {
            let column = tagged.tag_column();
            let base = CsvRow {
                track_id: track.track_id,
                track_name: &track.track_name,
                track_type: track.track_type.as_str(),
                aircraft_type: &track.aircraft_type,
                track_start_time: iso_time(track.start_time),
                track_end_time: iso_time(track.end_time),
                lifetime: track.lifetime,
                timestamp: None,
                latitude: None,
                longitude: None,
                altitude: None,
                speed: None,
                heading: None,
                ai_generated_tags: &column,
            };

            if track.positions.is_empty() {
                wtr.serialize(&base)?;
                continue;
            }
            for p in &track.positions {
                wtr.serialize(CsvRow {
                    track_start_time: base.track_start_time.clone(),
                    track_end_time: base.track_end_time.clone(),
                    timestamp: Some(iso_time(p.timestamp)),
                    latitude: Some(p.latitude),
                    longitude: Some(p.longitude),
                    altitude: Some(p.altitude),
                    speed: Some(p.speed),
                    heading: Some(p.heading),
                    ..base
                })?;
            }
        }
        wtr.flush()?;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonTrack<'a> {
    #[serde(flatten)]
    track: &'a Track,
    tags: &'a TagSet,
    features: &'a FeatureSummary,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    version: String,
    tracks: Vec<JsonTrack<'a>>,
}

pub fn write_json(path: &Path, tracks: &[Track], results: &[TrackTags]) -> Result<()> {
    let export = JsonExport {
        version: codec::VERSION.to_string(),
        tracks: tracks
            .iter()
            .zip(results)
            .map(|(track, tagged)| JsonTrack {
                track,
                tags: &tagged.tags,
                features: &tagged.features,
            })
            .collect(),
    };
    let text = serde_json::to_string_pretty(&export)?;
    write_atomic(path, |tmp| Ok(fs::write(tmp, text)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use atrk_core::{generate_tags, Position, TagClassifier, TrackType};

    fn tracks() -> Vec<Track> {
        let positions = (0..3)
            .map(|i| Position {
                timestamp: 1_700_000_000.0 + i as f64 * 30.0,
                latitude: 40.0,
                longitude: -75.0,
                altitude: 12_000.0,
                speed: 300.0,
                heading: 180.0,
            })
            .collect();
        vec![
            Track::new(
                1,
                "INC, \"quoted\"",
                TrackType::Incoming,
                "Boeing 737",
                1_700_000_000.0,
                1_700_000_060.0,
                positions,
            ),
            Track::new(
                2,
                "EMPTY",
                TrackType::Outgoing,
                "Airbus A320",
                1_700_000_000.0,
                1_700_000_000.0,
                Vec::new(),
            ),
        ]
    }

    #[test]
    fn test_iso_time() {
        assert_eq!(iso_time(0.0), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso_time(1.5), "1970-01-01T00:00:01.500Z");
        assert_eq!(iso_time(f64::NAN), "");
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path(Path::new("/data/out.csv"));
        assert_eq!(tmp, PathBuf::from("/data/out.csv.tmp"));
    }

    #[test]
    fn test_binary_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracks.bin");
        write_tracks(&path, &tracks()).unwrap();
        assert_eq!(read_tracks(&path).unwrap(), tracks());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_csv_rows_and_tag_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagged.csv");
        let tracks = tracks();
        let results = generate_tags(&TagClassifier::default(), &tracks);
        write_csv(&path, &tracks, &results).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.get(headers.len() - 1), Some(TAG_COLUMN));

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        // Three positions plus one placeholder row for the empty track
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][1], "INC, \"quoted\"");
        assert!(rows[0][13].ends_with("incoming_track"));
        assert_eq!(&rows[3][7], "");
        assert_eq!(&rows[3][13], "outgoing_track");
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagged.json");
        let tracks = tracks();
        let results = generate_tags(&TagClassifier::default(), &tracks);
        write_json(&path, &tracks, &results).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "1");
        assert_eq!(value["tracks"][0]["track_type"], "incoming");
        assert_eq!(value["tracks"][1]["tags"][0], "outgoing_track");
        assert_eq!(value["tracks"][0]["positions"].as_array().unwrap().len(), 3);
        assert_eq!(value["tracks"][0]["features"]["sample_count"], 3);
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bin");
        assert!(write_tracks(&path, &tracks()).is_err());
        assert!(!path.exists());
        assert!(!temp_path(&path).exists());
    }
}
