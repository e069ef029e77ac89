//! Reference tracks for demos and smoke tests.
//!
//! One descending arrival and one climbing departure, sampled every 30 s.

use std::f64::consts::PI;

use atrk_core::{Position, Track, TrackType};

const SAMPLE_INTERVAL: f64 = 30.0;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Arrival from the east: 35000 → 1000 ft, 450 → 225 kt, heading ~270°.
pub fn incoming(end_time: f64) -> Track {
    let n = 60;
    let start_time = end_time - 1800.0;
    let positions = (0..n)
        .map(|i| {
            let progress = i as f64 / (n - 1) as f64;
            Position {
                timestamp: start_time + i as f64 * SAMPLE_INTERVAL,
                latitude: lerp(40.0, 39.8, progress),
                longitude: lerp(-75.0, -75.5, progress),
                altitude: lerp(35_000.0, 1_000.0, progress),
                speed: 450.0 * (1.0 - progress * 0.5),
                heading: 270.0 + (progress * PI).sin() * 10.0,
            }
        })
        .collect();
    Track::new(
        1001,
        "INC-ALPHA-001",
        TrackType::Incoming,
        "Boeing 737",
        start_time,
        end_time,
        positions,
    )
}

/// Departure to the west: 1000 → 35000 ft, 150 → 500 kt, heading ~250°.
pub fn outgoing(end_time: f64) -> Track {
    let n = 80;
    let start_time = end_time - 2400.0;
    let positions = (0..n)
        .map(|i| {
            let progress = i as f64 / (n - 1) as f64;
            Position {
                timestamp: start_time + i as f64 * SAMPLE_INTERVAL,
                latitude: lerp(39.8, 39.6, progress),
                longitude: lerp(-75.5, -76.5, progress),
                altitude: lerp(1_000.0, 35_000.0, progress),
                speed: lerp(150.0, 500.0, progress),
                heading: 250.0 - (progress * PI).sin() * 15.0,
            }
        })
        .collect();
    Track::new(
        2001,
        "OUT-BRAVO-002",
        TrackType::Outgoing,
        "Airbus A320",
        start_time,
        end_time,
        positions,
    )
}

pub fn sample_tracks(end_time: f64) -> Vec<Track> {
    vec![incoming(end_time), outgoing(end_time)]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
