//! Tag classification thresholds.
//!
//! Reads/writes `~/.atrk/config.yaml`. Every section is optional; a file that
//! names only `speed.fast: 500` overrides that edge and keeps every other
//! default. A `TagConfig` is immutable once handed to the classifier.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aircraft::builtin_engine_table;
use crate::types::{Result, TrackError};

/// Full configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    pub speed: SpeedThresholds,
    pub g_force: GForceThresholds,
    pub path: PathThresholds,
    pub altitude: AltitudeThresholds,
    pub role: RoleThresholds,
    /// Aircraft type → engine count, matched exactly.
    pub aircraft_engines: BTreeMap<String, u8>,
}

/// Knots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedThresholds {
    pub very_slow: f64,
    pub slow: f64,
    pub moderate: f64,
    pub fast: f64,
    pub supersonic: f64,
    pub variable_std: f64,
    pub constant_std: f64,
}

/// Load factor band edges, g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GForceThresholds {
    pub light: f64,
    pub moderate: f64,
    pub high: f64,
    pub extreme: f64,
    pub extreme_plus: f64,
}

/// Degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathThresholds {
    pub linear: f64,
    pub straight_flight: f64,
    pub mostly_linear: f64,
    pub serpentine: f64,
    pub moderate_turn: f64,
    pub sharp_turn: f64,
}

/// Feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudeThresholds {
    pub medium: f64,
    pub cruise: f64,
    pub high: f64,
    pub level_change: f64,
    pub large_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleThresholds {
    pub airliner_max_heading_std: f64,
    pub airliner_min_speed: f64,
    pub airliner_max_speed: f64,
    pub airliner_max_g: f64,
    pub fighter_min_g: f64,
    pub fighter_min_speed: f64,
    pub tactical_min_g: f64,
    pub tactical_min_heading_std: f64,
    pub general_aviation_max_speed: f64,
    pub general_aviation_max_altitude: f64,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            speed: SpeedThresholds::default(),
            g_force: GForceThresholds::default(),
            path: PathThresholds::default(),
            altitude: AltitudeThresholds::default(),
            role: RoleThresholds::default(),
            aircraft_engines: builtin_engine_table(),
        }
    }
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        SpeedThresholds {
            very_slow: 150.0,
            slow: 250.0,
            moderate: 400.0,
            fast: 550.0,
            supersonic: 600.0,
            variable_std: 50.0,
            constant_std: 10.0,
        }
    }
}

impl Default for GForceThresholds {
    fn default() -> Self {
        GForceThresholds {
            light: 2.0,
            moderate: 4.0,
            high: 6.0,
            extreme: 8.0,
            extreme_plus: 10.0,
        }
    }
}

impl Default for PathThresholds {
    fn default() -> Self {
        PathThresholds {
            linear: 5.0,
            straight_flight: 5.0,
            mostly_linear: 15.0,
            serpentine: 30.0,
            moderate_turn: 45.0,
            sharp_turn: 90.0,
        }
    }
}

impl Default for AltitudeThresholds {
    fn default() -> Self {
        AltitudeThresholds {
            medium: 10_000.0,
            cruise: 25_000.0,
            high: 40_000.0,
            level_change: 1_000.0,
            large_change: 20_000.0,
        }
    }
}

impl Default for RoleThresholds {
    fn default() -> Self {
        RoleThresholds {
            airliner_max_heading_std: 10.0,
            airliner_min_speed: 250.0,
            airliner_max_speed: 500.0,
            airliner_max_g: 2.0,
            fighter_min_g: 5.0,
            fighter_min_speed: 400.0,
            tactical_min_g: 3.0,
            tactical_min_heading_std: 20.0,
            general_aviation_max_speed: 200.0,
            general_aviation_max_altitude: 15_000.0,
        }
    }
}

impl TagConfig {
    /// Check that band edges ascend and no threshold is negative or NaN.
    pub fn validate(&self) -> Result<()> {
        let s = &self.speed;
        ascending("speed", &[s.very_slow, s.slow, s.moderate, s.fast])?;
        let g = &self.g_force;
        ascending(
            "g_force",
            &[g.light, g.moderate, g.high, g.extreme, g.extreme_plus],
        )?;
        let a = &self.altitude;
        ascending("altitude", &[a.medium, a.cruise, a.high])?;
        let p = &self.path;
        ascending("path", &[p.linear, p.mostly_linear])?;

        let named = [
            ("speed.supersonic", s.supersonic),
            ("speed.variable_std", s.variable_std),
            ("speed.constant_std", s.constant_std),
            ("path.straight_flight", p.straight_flight),
            ("path.serpentine", p.serpentine),
            ("path.moderate_turn", p.moderate_turn),
            ("path.sharp_turn", p.sharp_turn),
            ("altitude.level_change", a.level_change),
            ("altitude.large_change", a.large_change),
        ];
        for (name, v) in named {
            non_negative(name, v)?;
        }
        if self.role.airliner_min_speed > self.role.airliner_max_speed {
            return Err(TrackError::Config(format!(
                "role.airliner_min_speed {} exceeds airliner_max_speed {}",
                self.role.airliner_min_speed, self.role.airliner_max_speed
            )));
        }
        Ok(())
    }
}

fn ascending(section: &str, edges: &[f64]) -> Result<()> {
    for v in edges {
        non_negative(section, *v)?;
    }
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(TrackError::Config(format!(
            "{section} band edges must be strictly ascending: {edges:?}"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, v: f64) -> Result<()> {
    if v.is_nan() || v < 0.0 {
        return Err(TrackError::Config(format!("{name} must be >= 0, got {v}")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// File handling
// ---------------------------------------------------------------------------

/// Get the config directory path (`~/.atrk/`).
pub fn config_dir() -> PathBuf {
    dirs_home().join(".atrk")
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.yaml")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load `~/.atrk/config.yaml`, or defaults if it doesn't exist.
pub fn load_config() -> Result<TagConfig> {
    let path = config_file();
    if !path.exists() {
        return Ok(TagConfig::default());
    }
    load_config_from(&path)
}

/// Load and validate a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<TagConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| TrackError::Config(format!("{}: {e}", path.display())))?;
    let config = parse_config(&text)?;
    log::debug!("loaded tag config from {}", path.display());
    Ok(config)
}

/// Parse YAML config text. Missing sections and keys take their defaults.
pub fn parse_config(text: &str) -> Result<TagConfig> {
    // An empty document deserializes as unit, not as an empty map.
    if text.trim().is_empty() {
        return Ok(TagConfig::default());
    }
    let config: TagConfig =
        serde_yaml::from_str(text).map_err(|e| TrackError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Serialize config to YAML text.
pub fn serialize_config(config: &TagConfig) -> Result<String> {
    let body = serde_yaml::to_string(config).map_err(|e| TrackError::Config(e.to_string()))?;
    Ok(format!("# atrk tag thresholds\n\n{body}"))
}

/// Save config to `~/.atrk/config.yaml`.
pub fn save_config(config: &TagConfig) -> Result<PathBuf> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir).map_err(|e| TrackError::Config(e.to_string()))?;

    let path = config_file();
    std::fs::write(&path, serialize_config(config)?)
        .map_err(|e| TrackError::Config(e.to_string()))?;

    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TagConfig::default();
        assert_eq!(config.speed.very_slow, 150.0);
        assert_eq!(config.speed.supersonic, 600.0);
        assert_eq!(config.g_force.extreme_plus, 10.0);
        assert_eq!(config.path.sharp_turn, 90.0);
        assert_eq!(config.altitude.high, 40_000.0);
        assert_eq!(config.aircraft_engines.get("B-52"), Some(&8));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_override() {
        let text = r#"
speed:
  fast: 500
path:
  straight_flight: 2.5
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.speed.fast, 500.0);
        assert_eq!(config.speed.moderate, 400.0);
        assert_eq!(config.path.straight_flight, 2.5);
        assert_eq!(config.path.linear, 5.0);
        assert_eq!(config.g_force, GForceThresholds::default());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_config("").unwrap(), TagConfig::default());
        assert_eq!(parse_config("  \n").unwrap(), TagConfig::default());
    }

    #[test]
    fn test_parse_aircraft_table_replaces() {
        let text = r#"
aircraft_engines:
  "Boeing 787": 2
  "An-225": 6
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.aircraft_engines.len(), 2);
        assert_eq!(config.aircraft_engines.get("An-225"), Some(&6));
        assert!(config.aircraft_engines.get("Boeing 737").is_none());
    }

    #[test]
    fn test_parse_rejects_descending_bands() {
        let text = "g_force:\n  moderate: 1.5\n";
        assert!(matches!(parse_config(text), Err(TrackError::Config(_))));
    }

    #[test]
    fn test_parse_rejects_negative() {
        let text = "altitude:\n  level_change: -5\n";
        assert!(matches!(parse_config(text), Err(TrackError::Config(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_config("speed: [1, 2"),
            Err(TrackError::Config(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = TagConfig::default();
        config.speed.slow = 240.0;
        config.role.fighter_min_g = 5.5;
        config.aircraft_engines.insert("Boeing 787".into(), 2);

        let text = serialize_config(&config).unwrap();
        assert!(text.starts_with("# atrk tag thresholds"));
        let parsed = parse_config(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = Path::new("/nonexistent/atrk/config.yaml");
        assert!(matches!(load_config_from(path), Err(TrackError::Config(_))));
    }
}
