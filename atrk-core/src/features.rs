//! Per-track behavioral features from a position time series.
//!
//! Pure and total: every well-formed `Track` produces a `FeatureSummary`,
//! including tracks with zero or one position. Non-finite intermediate
//! results never reach the summary; see [`FeatureSummary::sanitized`].

use serde::Serialize;

use crate::types::{Position, Track};

/// Knots to meters per second.
pub const KNOTS_TO_MS: f64 = 0.514444;

/// Standard gravity, m/s².
pub const GRAVITY_MS2: f64 = 9.81;

/// Load factor of straight, unaccelerated flight.
pub const LEVEL_FLIGHT_G: f64 = 1.0;

/// Scalar features summarizing one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub sample_count: usize,

    pub speed_mean: f64,
    pub speed_max: f64,
    pub speed_min: f64,
    pub speed_std: f64,

    /// Peak load factor over all sample pairs; never below 1.0.
    pub max_g_force: f64,
    pub mean_g_force: f64,

    /// Population std of wrapped successive heading deltas, degrees.
    pub heading_std: f64,
    /// Largest absolute wrapped heading delta, degrees.
    pub max_heading_change: f64,

    pub altitude_min: f64,
    pub altitude_max: f64,
    pub altitude_mean: f64,
    /// Signed: last minus first.
    pub altitude_change: f64,
    /// Feet per second over the track lifetime.
    pub altitude_rate: f64,
}

impl Default for FeatureSummary {
    fn default() -> Self {
        FeatureSummary {
            sample_count: 0,
            speed_mean: 0.0,
            speed_max: 0.0,
            speed_min: 0.0,
            speed_std: 0.0,
            max_g_force: LEVEL_FLIGHT_G,
            mean_g_force: LEVEL_FLIGHT_G,
            heading_std: 0.0,
            max_heading_change: 0.0,
            altitude_min: 0.0,
            altitude_max: 0.0,
            altitude_mean: 0.0,
            altitude_change: 0.0,
            altitude_rate: 0.0,
        }
    }
}

impl FeatureSummary {
    /// Replace non-finite fields: g-force fields fall back to 1.0, the rest to 0.0.
    pub fn sanitized(mut self) -> Self {
        fn or(v: f64, fallback: f64) -> f64 {
            if v.is_finite() {
                v
            } else {
                fallback
            }
        }
        self.speed_mean = or(self.speed_mean, 0.0);
        self.speed_max = or(self.speed_max, 0.0);
        self.speed_min = or(self.speed_min, 0.0);
        self.speed_std = or(self.speed_std, 0.0);
        self.max_g_force = or(self.max_g_force, LEVEL_FLIGHT_G).max(LEVEL_FLIGHT_G);
        self.mean_g_force = or(self.mean_g_force, LEVEL_FLIGHT_G).max(LEVEL_FLIGHT_G);
        self.heading_std = or(self.heading_std, 0.0);
        self.max_heading_change = or(self.max_heading_change, 0.0);
        self.altitude_min = or(self.altitude_min, 0.0);
        self.altitude_max = or(self.altitude_max, 0.0);
        self.altitude_mean = or(self.altitude_mean, 0.0);
        self.altitude_change = or(self.altitude_change, 0.0);
        self.altitude_rate = or(self.altitude_rate, 0.0);
        self
    }
}

// ---------------------------------------------------------------------------
// Circular heading math
// ---------------------------------------------------------------------------

/// Wrap a heading difference into (-180, 180].
///
/// 359° → 1° is +2°, not -358°. Exactly -180° maps to +180°.
pub fn normalize_heading_delta(delta: f64) -> f64 {
    let mut d = delta % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Wrapped successive heading differences; one fewer than the input length.
pub fn heading_deltas(positions: &[Position]) -> Vec<f64> {
    positions
        .windows(2)
        .map(|w| normalize_heading_delta(w[1].heading - w[0].heading))
        .collect()
}

// ---------------------------------------------------------------------------
// Load factor
// ---------------------------------------------------------------------------

/// Total load factor of a coordinated turn.
///
/// `speed_kts` is the ground speed at the start of the interval, `delta_deg`
/// the wrapped heading change over `dt` seconds. Returns `None` when `dt` is
/// not positive.
pub fn load_factor(speed_kts: f64, delta_deg: f64, dt: f64) -> Option<f64> {
    if dt <= 0.0 || dt.is_nan() {
        return None;
    }
    let angular_velocity = delta_deg.abs().to_radians() / dt;
    let velocity = speed_kts * KNOTS_TO_MS;
    let lateral = velocity * angular_velocity;
    let g = lateral / GRAVITY_MS2;
    Some((1.0 + g * g).sqrt())
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Compute the feature summary of a track. Never fails, never mutates.
pub fn extract(track: &Track) -> FeatureSummary {
    let positions = &track.positions;
    if positions.is_empty() {
        return FeatureSummary::default();
    }

    let speeds: Vec<f64> = positions.iter().map(|p| p.speed).collect();
    let altitudes: Vec<f64> = positions.iter().map(|p| p.altitude).collect();
    let (speed_min, speed_max) = min_max(&speeds);
    let (altitude_min, altitude_max) = min_max(&altitudes);

    let deltas = heading_deltas(positions);
    let max_heading_change = deltas.iter().fold(0.0f64, |acc, d| acc.max(d.abs()));

    let g_values: Vec<f64> = positions
        .windows(2)
        .zip(&deltas)
        .filter_map(|(w, &delta)| load_factor(w[0].speed, delta, w[1].timestamp - w[0].timestamp))
        .filter(|g| g.is_finite())
        .collect();
    let (max_g_force, mean_g_force) = if g_values.is_empty() {
        (LEVEL_FLIGHT_G, LEVEL_FLIGHT_G)
    } else {
        (min_max(&g_values).1, mean(&g_values))
    };

    let altitude_change = altitudes[altitudes.len() - 1] - altitudes[0];
    let altitude_rate = if track.lifetime > 0.0 {
        altitude_change / track.lifetime
    } else {
        0.0
    };

    FeatureSummary {
        sample_count: positions.len(),
        speed_mean: mean(&speeds),
        speed_max,
        speed_min,
        speed_std: std_dev(&speeds),
        max_g_force,
        mean_g_force,
        heading_std: std_dev(&deltas),
        max_heading_change,
        altitude_min,
        altitude_max,
        altitude_mean: mean(&altitudes),
        altitude_change,
        altitude_rate,
    }
    .sanitized()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
