//! Behavioral tag classification.
//!
//! Categories are evaluated in a fixed order: speed, maneuvering, path,
//! altitude, engine, role, track type. Within a category tags fire
//! independently unless they form a band; bands are half-open `[low, high)`
//! and exactly one band tag fires per banded category.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::aircraft;
use crate::config::{RoleThresholds, TagConfig};
use crate::features::{self, FeatureSummary};
use crate::types::{Track, TrackType};

// ---------------------------------------------------------------------------
// Tag names
// ---------------------------------------------------------------------------

pub const TAG_VERY_SLOW: &str = "very_slow_moving";
pub const TAG_SLOW: &str = "slow_moving";
pub const TAG_MODERATE_SPEED: &str = "moderate_speed";
pub const TAG_FAST: &str = "fast_moving";
pub const TAG_VERY_FAST: &str = "very_fast_moving";
pub const TAG_SUPERSONIC: &str = "supersonic_capable";
pub const TAG_VARIABLE_SPEED: &str = "variable_speed";
pub const TAG_CONSTANT_SPEED: &str = "constant_speed";

pub const TAG_MINIMAL_MANEUVERING: &str = "minimal_maneuvering";
pub const TAG_LIGHT_MANEUVERING: &str = "light_maneuvering_2g_4g";
pub const TAG_MODERATE_MANEUVERING: &str = "moderate_maneuvering_4g_6g";
pub const TAG_HIGH_MANEUVERING: &str = "high_maneuvering_6g_8g";
pub const TAG_EXTREME_MANEUVERING: &str = "extreme_maneuvering_8g_10g";
pub const TAG_EXTREME_PLUS_MANEUVERING: &str = "extreme_maneuvering_10g_plus";

pub const TAG_LINEAR_PATH: &str = "linear_path";
pub const TAG_STRAIGHT_FLIGHT: &str = "straight_flight";
pub const TAG_MOSTLY_LINEAR: &str = "mostly_linear";
pub const TAG_CURVED_PATH: &str = "curved_path";
pub const TAG_SERPENTINE: &str = "serpentine_pattern";
pub const TAG_SHARP_TURNS: &str = "sharp_turns";
pub const TAG_MODERATE_TURNS: &str = "moderate_turns";

pub const TAG_LOW_ALTITUDE: &str = "low_altitude";
pub const TAG_MEDIUM_ALTITUDE: &str = "medium_altitude";
pub const TAG_CRUISE_ALTITUDE: &str = "cruise_altitude";
pub const TAG_HIGH_ALTITUDE: &str = "high_altitude";
pub const TAG_LEVEL_FLIGHT: &str = "level_flight";
pub const TAG_LARGE_ALTITUDE_CHANGE: &str = "large_altitude_change";
pub const TAG_CLIMBING: &str = "climbing";
pub const TAG_DESCENDING: &str = "descending";

pub const TAG_AIRLINER: &str = "commercial_airliner_profile";
pub const TAG_FIGHTER: &str = "military_fighter_profile";
pub const TAG_TACTICAL: &str = "tactical_maneuvering";
pub const TAG_GENERAL_AVIATION: &str = "general_aviation_profile";

pub const TAG_INCOMING: &str = "incoming_track";
pub const TAG_OUTGOING: &str = "outgoing_track";

/// Separator used when a tag set is rendered as a single column value.
pub const TAG_SEPARATOR: &str = "; ";

// ---------------------------------------------------------------------------
// TagSet
// ---------------------------------------------------------------------------

/// Insertion-ordered set of tags. Pushing a tag already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<&'static str>,
}

impl TagSet {
    pub fn new() -> Self {
        TagSet::default()
    }

    pub fn push(&mut self, tag: &'static str) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tags.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.tags
    }
}

/// Renders as the tag column value: tags joined by `"; "`.
impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(TAG_SEPARATOR))
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tags.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Role rules
// ---------------------------------------------------------------------------

pub type RolePredicate = fn(&RoleThresholds, &FeatureSummary) -> bool;

/// Role inference rules, evaluated in order. Every matching rule fires.
pub const ROLE_RULES: &[(&str, RolePredicate)] = &[
    (TAG_AIRLINER, is_airliner),
    (TAG_FIGHTER, is_fighter),
    (TAG_TACTICAL, is_tactical),
    (TAG_GENERAL_AVIATION, is_general_aviation),
];

fn is_airliner(r: &RoleThresholds, f: &FeatureSummary) -> bool {
    f.heading_std < r.airliner_max_heading_std
        && (r.airliner_min_speed..=r.airliner_max_speed).contains(&f.speed_mean)
        && f.max_g_force < r.airliner_max_g
}

fn is_fighter(r: &RoleThresholds, f: &FeatureSummary) -> bool {
    f.max_g_force > r.fighter_min_g && f.speed_mean > r.fighter_min_speed
}

fn is_tactical(r: &RoleThresholds, f: &FeatureSummary) -> bool {
    f.max_g_force > r.tactical_min_g && f.heading_std > r.tactical_min_heading_std
}

fn is_general_aviation(r: &RoleThresholds, f: &FeatureSummary) -> bool {
    f.speed_mean < r.general_aviation_max_speed
        && f.altitude_mean < r.general_aviation_max_altitude
}

/// Pick the band tag for `value` given ascending edges.
///
/// `tags` has one more entry than `edges`; `value < edges[0]` selects
/// `tags[0]`, `value >= edges[last]` selects the last tag.
fn band(value: f64, edges: &[f64], tags: &[&'static str]) -> &'static str {
    debug_assert_eq!(tags.len(), edges.len() + 1);
    let idx = edges.iter().take_while(|&&edge| value >= edge).count();
    tags[idx]
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Threshold-driven tag derivation over extracted features.
///
/// Holds an immutable `TagConfig`; build a new classifier to change thresholds.
#[derive(Debug, Clone, Default)]
pub struct TagClassifier {
    config: TagConfig,
}

impl TagClassifier {
    pub fn new(config: TagConfig) -> Self {
        TagClassifier { config }
    }

    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    /// Extract features and classify in one step.
    pub fn tag_track(&self, track: &Track) -> TagSet {
        self.classify(track, &features::extract(track))
    }

    /// Classify a track from precomputed features.
    ///
    /// A track without positions carries only its track-type tag.
    pub fn classify(&self, track: &Track, features: &FeatureSummary) -> TagSet {
        let mut tags = TagSet::new();

        if !track.positions.is_empty() {
            self.speed_tags(features, &mut tags);
            self.maneuver_tags(features, &mut tags);
            self.path_tags(features, &mut tags);
            self.altitude_tags(features, &mut tags);
            self.engine_tags(&track.aircraft_type, &mut tags);
            self.role_tags(features, &mut tags);
        }
        tags.push(track_type_tag(track.track_type));

        log::debug!("track {} tagged: {}", track.track_id, tags);
        tags
    }

    fn speed_tags(&self, f: &FeatureSummary, tags: &mut TagSet) {
        let s = &self.config.speed;
        tags.push(band(
            f.speed_mean,
            &[s.very_slow, s.slow, s.moderate, s.fast],
            &[TAG_VERY_SLOW, TAG_SLOW, TAG_MODERATE_SPEED, TAG_FAST, TAG_VERY_FAST],
        ));
        if f.speed_max > s.supersonic {
            tags.push(TAG_SUPERSONIC);
        }
        if f.speed_std > s.variable_std {
            tags.push(TAG_VARIABLE_SPEED);
        }
        if f.speed_std < s.constant_std {
            tags.push(TAG_CONSTANT_SPEED);
        }
    }

    fn maneuver_tags(&self, f: &FeatureSummary, tags: &mut TagSet) {
        let g = &self.config.g_force;
        tags.push(band(
            f.max_g_force,
            &[g.light, g.moderate, g.high, g.extreme, g.extreme_plus],
            &[
                TAG_MINIMAL_MANEUVERING,
                TAG_LIGHT_MANEUVERING,
                TAG_MODERATE_MANEUVERING,
                TAG_HIGH_MANEUVERING,
                TAG_EXTREME_MANEUVERING,
                TAG_EXTREME_PLUS_MANEUVERING,
            ],
        ));
    }

    fn path_tags(&self, f: &FeatureSummary, tags: &mut TagSet) {
        let p = &self.config.path;
        if f.heading_std < p.linear {
            tags.push(TAG_LINEAR_PATH);
        }
        if f.heading_std < p.straight_flight {
            tags.push(TAG_STRAIGHT_FLIGHT);
        }
        if f.heading_std >= p.linear && f.heading_std < p.mostly_linear {
            tags.push(TAG_MOSTLY_LINEAR);
        }
        if f.heading_std >= p.mostly_linear {
            tags.push(TAG_CURVED_PATH);
        }
        if f.heading_std > p.serpentine {
            tags.push(TAG_SERPENTINE);
        }
        if f.max_heading_change > p.sharp_turn {
            tags.push(TAG_SHARP_TURNS);
        }
        if f.max_heading_change > p.moderate_turn {
            tags.push(TAG_MODERATE_TURNS);
        }
    }

    fn altitude_tags(&self, f: &FeatureSummary, tags: &mut TagSet) {
        let a = &self.config.altitude;
        tags.push(band(
            f.altitude_mean,
            &[a.medium, a.cruise, a.high],
            &[
                TAG_LOW_ALTITUDE,
                TAG_MEDIUM_ALTITUDE,
                TAG_CRUISE_ALTITUDE,
                TAG_HIGH_ALTITUDE,
            ],
        ));
        let change = f.altitude_change.abs();
        if change < a.level_change {
            tags.push(TAG_LEVEL_FLIGHT);
        }
        if change > a.large_change {
            tags.push(TAG_LARGE_ALTITUDE_CHANGE);
        }
        if f.altitude_rate > 0.0 {
            tags.push(TAG_CLIMBING);
        } else if f.altitude_rate < 0.0 {
            tags.push(TAG_DESCENDING);
        }
    }

    fn engine_tags(&self, aircraft_type: &str, tags: &mut TagSet) {
        if let Some(tag) = aircraft::lookup_engine_tag(&self.config.aircraft_engines, aircraft_type)
        {
            tags.push(tag);
        }
    }

    fn role_tags(&self, f: &FeatureSummary, tags: &mut TagSet) {
        for &(tag, rule) in ROLE_RULES {
            if rule(&self.config.role, f) {
                tags.push(tag);
            }
        }
    }
}

pub fn track_type_tag(track_type: TrackType) -> &'static str {
    match track_type {
        TrackType::Incoming => TAG_INCOMING,
        TrackType::Outgoing => TAG_OUTGOING,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn classifier() -> TagClassifier {
        TagClassifier::new(TagConfig::default())
    }

    fn one_sample_track(aircraft: &str, track_type: TrackType) -> Track {
        Track::new(
            1,
            "T",
            track_type,
            aircraft,
            0.0,
            60.0,
            vec![Position {
                timestamp: 0.0,
                latitude: 0.0,
                longitude: 0.0,
                altitude: 0.0,
                speed: 0.0,
                heading: 0.0,
            }],
        )
    }

    fn features() -> FeatureSummary {
        FeatureSummary {
            sample_count: 10,
            ..FeatureSummary::default()
        }
    }

    fn tags_for(f: &FeatureSummary) -> TagSet {
        classifier().classify(&one_sample_track("Unknown", TrackType::Incoming), f)
    }

    /// Scenario: 60 samples at 30 s, 450 → 225 kt, heading 270°, 35000 → 1000 ft.
    fn approach_track() -> Track {
        let n = 60;
        let positions = (0..n)
            .map(|i| {
                let progress = i as f64 / (n - 1) as f64;
                Position {
                    timestamp: 1_000.0 + i as f64 * 30.0,
                    latitude: 40.0 - 0.2 * progress,
                    longitude: -75.0 - 0.5 * progress,
                    altitude: 35_000.0 * (1.0 - progress) + 1_000.0 * progress,
                    speed: 450.0 * (1.0 - progress * 0.5),
                    heading: 270.0,
                }
            })
            .collect();
        Track::new(
            1001,
            "INC-ALPHA-001",
            TrackType::Incoming,
            "Boeing 737",
            1_000.0,
            1_000.0 + 59.0 * 30.0,
            positions,
        )
    }

    #[test]
    fn test_tagset_dedup_and_order() {
        let mut t = TagSet::new();
        t.push("b");
        t.push("a");
        t.push("b");
        assert_eq!(t.as_slice(), &["b", "a"]);
        assert_eq!(t.to_string(), "b; a");
    }

    #[test]
    fn test_band_edges_half_open() {
        let edges = [1.0, 2.0];
        let names = ["lo", "mid", "hi"];
        assert_eq!(band(0.999, &edges, &names), "lo");
        assert_eq!(band(1.0, &edges, &names), "mid");
        assert_eq!(band(1.999, &edges, &names), "mid");
        assert_eq!(band(2.0, &edges, &names), "hi");
    }

    #[test]
    fn test_exactly_one_speed_band() {
        let bands = [TAG_VERY_SLOW, TAG_SLOW, TAG_MODERATE_SPEED, TAG_FAST, TAG_VERY_FAST];
        let mut speed = 0.0;
        while speed < 800.0 {
            let f = FeatureSummary {
                speed_mean: speed,
                ..features()
            };
            let tags = tags_for(&f);
            let n = bands.iter().filter(|b| tags.contains(b)).count();
            assert_eq!(n, 1, "speed {speed} fired {n} bands");
            speed += 2.5;
        }
    }

    #[test]
    fn test_speed_band_edges() {
        let expect = [
            (149.99, TAG_VERY_SLOW),
            (150.0, TAG_SLOW),
            (250.0, TAG_MODERATE_SPEED),
            (400.0, TAG_FAST),
            (549.99, TAG_FAST),
            (550.0, TAG_VERY_FAST),
        ];
        for (speed, tag) in expect {
            let f = FeatureSummary {
                speed_mean: speed,
                ..features()
            };
            assert!(tags_for(&f).contains(tag), "{speed} should be {tag}");
        }
    }

    #[test]
    fn test_speed_variance_tags() {
        let f = FeatureSummary {
            speed_std: 60.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_VARIABLE_SPEED));
        assert!(!tags.contains(TAG_CONSTANT_SPEED));

        let f = FeatureSummary {
            speed_std: 5.0,
            ..features()
        };
        assert!(tags_for(&f).contains(TAG_CONSTANT_SPEED));

        let f = FeatureSummary {
            speed_std: 30.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(!tags.contains(TAG_VARIABLE_SPEED));
        assert!(!tags.contains(TAG_CONSTANT_SPEED));
    }

    #[test]
    fn test_supersonic_strictly_above() {
        let f = FeatureSummary {
            speed_max: 600.0,
            ..features()
        };
        assert!(!tags_for(&f).contains(TAG_SUPERSONIC));
        let f = FeatureSummary {
            speed_max: 600.5,
            ..features()
        };
        assert!(tags_for(&f).contains(TAG_SUPERSONIC));
    }

    #[test]
    fn test_maneuver_bands() {
        let expect = [
            (1.0, TAG_MINIMAL_MANEUVERING),
            (1.99, TAG_MINIMAL_MANEUVERING),
            (2.0, TAG_LIGHT_MANEUVERING),
            (4.0, TAG_MODERATE_MANEUVERING),
            (6.0, TAG_HIGH_MANEUVERING),
            (7.2, TAG_HIGH_MANEUVERING),
            (8.0, TAG_EXTREME_MANEUVERING),
            (10.0, TAG_EXTREME_PLUS_MANEUVERING),
            (25.0, TAG_EXTREME_PLUS_MANEUVERING),
        ];
        for (g, tag) in expect {
            let f = FeatureSummary {
                max_g_force: g,
                ..features()
            };
            let tags = tags_for(&f);
            assert!(tags.contains(tag), "{g}g should be {tag}, got {tags}");
        }
    }

    #[test]
    fn test_path_linear_and_straight() {
        let f = FeatureSummary {
            heading_std: 1.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_LINEAR_PATH));
        assert!(tags.contains(TAG_STRAIGHT_FLIGHT));
        assert!(!tags.contains(TAG_MOSTLY_LINEAR));
    }

    #[test]
    fn test_straight_flight_threshold_independent() {
        let mut config = TagConfig::default();
        config.path.straight_flight = 2.0;
        let c = TagClassifier::new(config);
        let track = one_sample_track("X", TrackType::Incoming);
        let f = FeatureSummary {
            heading_std: 3.0,
            ..features()
        };
        let tags = c.classify(&track, &f);
        assert!(tags.contains(TAG_LINEAR_PATH));
        assert!(!tags.contains(TAG_STRAIGHT_FLIGHT));
    }

    #[test]
    fn test_path_mostly_linear_and_curved() {
        let f = FeatureSummary {
            heading_std: 5.0,
            ..features()
        };
        assert!(tags_for(&f).contains(TAG_MOSTLY_LINEAR));

        let f = FeatureSummary {
            heading_std: 15.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_CURVED_PATH));
        assert!(!tags.contains(TAG_MOSTLY_LINEAR));
        assert!(!tags.contains(TAG_SERPENTINE));
    }

    #[test]
    fn test_serpentine_with_curved() {
        let f = FeatureSummary {
            heading_std: 31.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_CURVED_PATH));
        assert!(tags.contains(TAG_SERPENTINE));
    }

    #[test]
    fn test_turn_tags_both_fire() {
        let f = FeatureSummary {
            max_heading_change: 120.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_SHARP_TURNS));
        assert!(tags.contains(TAG_MODERATE_TURNS));

        let f = FeatureSummary {
            max_heading_change: 60.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(!tags.contains(TAG_SHARP_TURNS));
        assert!(tags.contains(TAG_MODERATE_TURNS));
    }

    #[test]
    fn test_altitude_bands_and_trend() {
        let f = FeatureSummary {
            altitude_mean: 30_000.0,
            altitude_change: 500.0,
            altitude_rate: 0.5,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_CRUISE_ALTITUDE));
        assert!(tags.contains(TAG_LEVEL_FLIGHT));
        assert!(tags.contains(TAG_CLIMBING));
        assert!(!tags.contains(TAG_DESCENDING));

        let f = FeatureSummary {
            altitude_mean: 40_000.0,
            altitude_change: -25_000.0,
            altitude_rate: -10.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_HIGH_ALTITUDE));
        assert!(tags.contains(TAG_LARGE_ALTITUDE_CHANGE));
        assert!(tags.contains(TAG_DESCENDING));
    }

    #[test]
    fn test_flat_rate_neither_climbing_nor_descending() {
        let tags = tags_for(&features());
        assert!(!tags.contains(TAG_CLIMBING));
        assert!(!tags.contains(TAG_DESCENDING));
        assert!(tags.contains(TAG_LOW_ALTITUDE));
    }

    #[test]
    fn test_engine_tag_known_and_unknown() {
        let c = classifier();
        let f = features();
        let tags = c.classify(&one_sample_track("Airbus A340", TrackType::Incoming), &f);
        assert!(tags.contains(aircraft::TAG_FOUR_ENGINE));

        let tags = c.classify(&one_sample_track("Mystery Jet", TrackType::Incoming), &f);
        assert!(!tags.iter().any(|t| t.ends_with("_engine")));
    }

    #[test]
    fn test_role_airliner_inclusive_speed() {
        for speed in [250.0, 500.0] {
            let f = FeatureSummary {
                speed_mean: speed,
                heading_std: 2.0,
                max_g_force: 1.1,
                altitude_mean: 30_000.0,
                ..features()
            };
            assert!(tags_for(&f).contains(TAG_AIRLINER), "speed {speed}");
        }
    }

    #[test]
    fn test_role_general_aviation() {
        let f = FeatureSummary {
            speed_mean: 110.0,
            altitude_mean: 4_500.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_GENERAL_AVIATION));
        assert!(!tags.contains(TAG_AIRLINER));
    }

    #[test]
    fn test_roles_not_mutually_exclusive() {
        let f = FeatureSummary {
            speed_mean: 500.0,
            max_g_force: 6.0,
            heading_std: 25.0,
            ..features()
        };
        let tags = tags_for(&f);
        assert!(tags.contains(TAG_FIGHTER));
        assert!(tags.contains(TAG_TACTICAL));
    }

    #[test]
    fn test_empty_track_only_type_tag() {
        let mut track = one_sample_track("Boeing 737", TrackType::Outgoing);
        track.positions.clear();
        let tags = classifier().tag_track(&track);
        assert_eq!(tags.as_slice(), &[TAG_OUTGOING]);

        track.track_type = TrackType::Incoming;
        assert_eq!(classifier().tag_track(&track).to_string(), "incoming_track");
    }

    #[test]
    fn test_category_order() {
        let f = FeatureSummary {
            speed_mean: 300.0,
            speed_std: 5.0,
            heading_std: 1.0,
            altitude_mean: 30_000.0,
            altitude_rate: -1.0,
            altitude_change: -100.0,
            ..features()
        };
        let track = one_sample_track("Boeing 777", TrackType::Outgoing);
        let tags = classifier().classify(&track, &f);
        assert_eq!(
            tags.as_slice(),
            &[
                TAG_MODERATE_SPEED,
                TAG_CONSTANT_SPEED,
                TAG_MINIMAL_MANEUVERING,
                TAG_LINEAR_PATH,
                TAG_STRAIGHT_FLIGHT,
                TAG_CRUISE_ALTITUDE,
                TAG_LEVEL_FLIGHT,
                TAG_DESCENDING,
                aircraft::TAG_TWIN_ENGINE,
                TAG_AIRLINER,
                TAG_OUTGOING,
            ]
        );
    }

    #[test]
    fn test_scenario_descending_approach() {
        let track = approach_track();
        let tags = classifier().tag_track(&track);
        assert!(tags.contains(TAG_LINEAR_PATH));
        assert!(tags.contains(TAG_DESCENDING));
        assert!(tags.contains(TAG_MINIMAL_MANEUVERING));
        assert!(!tags.contains(TAG_SUPERSONIC));
        assert!(tags.contains(TAG_MODERATE_SPEED));
        assert!(tags.contains(TAG_LARGE_ALTITUDE_CHANGE));
        assert!(tags.contains(aircraft::TAG_TWIN_ENGINE));
        assert!(tags.contains(TAG_AIRLINER));
        assert_eq!(tags.iter().last(), Some(TAG_INCOMING));
    }

    #[test]
    fn test_scenario_fighter() {
        let f = FeatureSummary {
            speed_mean: 550.0,
            speed_max: 650.0,
            speed_std: 40.0,
            heading_std: 35.0,
            max_heading_change: 70.0,
            max_g_force: 7.2,
            altitude_mean: 18_000.0,
            ..features()
        };
        let track = one_sample_track("F-16", TrackType::Outgoing);
        let tags = classifier().classify(&track, &f);
        for tag in [
            TAG_VERY_FAST,
            TAG_SUPERSONIC,
            TAG_HIGH_MANEUVERING,
            TAG_CURVED_PATH,
            TAG_SERPENTINE,
            TAG_FIGHTER,
            TAG_TACTICAL,
            aircraft::TAG_SINGLE_ENGINE,
        ] {
            assert!(tags.contains(tag), "missing {tag} in {tags}");
        }
        assert!(!tags.contains(TAG_AIRLINER));
    }

    #[test]
    fn test_custom_config_overrides() {
        let mut config = TagConfig::default();
        config.speed.fast = 500.0;
        let c = TagClassifier::new(config);
        let f = FeatureSummary {
            speed_mean: 520.0,
            ..features()
        };
        let tags = c.classify(&one_sample_track("X", TrackType::Incoming), &f);
        assert!(tags.contains(TAG_VERY_FAST));
    }
}
