//! Aircraft type → engine configuration.
//!
//! The built-in table seeds `TagConfig::aircraft_engines`; deployments can
//! extend or replace it through the config file. Matching is exact and
//! case-sensitive.

use std::collections::BTreeMap;

pub const TAG_SINGLE_ENGINE: &str = "single_engine";
pub const TAG_TWIN_ENGINE: &str = "twin_engine";
pub const TAG_FOUR_ENGINE: &str = "four_engine";
pub const TAG_EIGHT_ENGINE: &str = "eight_engine";

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

/// Known aircraft types and their engine counts.
pub const BUILTIN_ENGINES: &[(&str, u8)] = &[
    ("Boeing 737", 2),
    ("Boeing 747", 4),
    ("Boeing 777", 2),
    ("Airbus A320", 2),
    ("Airbus A330", 2),
    ("Airbus A340", 4),
    ("Airbus A380", 4),
    ("F-16", 1),
    ("Cessna 172", 1),
    ("B-52", 8),
];

/// The built-in table as an owned map, for configuration defaults.
pub fn builtin_engine_table() -> BTreeMap<String, u8> {
    BUILTIN_ENGINES
        .iter()
        .map(|(name, count)| (name.to_string(), *count))
        .collect()
}

/// Tag for an engine count. Counts without a named configuration have no tag.
pub fn engine_tag(engines: u8) -> Option<&'static str> {
    match engines {
        1 => Some(TAG_SINGLE_ENGINE),
        2 => Some(TAG_TWIN_ENGINE),
        4 => Some(TAG_FOUR_ENGINE),
        8 => Some(TAG_EIGHT_ENGINE),
        _ => None,
    }
}

/// Engine tag for an aircraft type, or `None` for unknown types.
pub fn lookup_engine_tag(table: &BTreeMap<String, u8>, aircraft_type: &str) -> Option<&'static str> {
    table.get(aircraft_type).copied().and_then(engine_tag)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookups() {
        let table = builtin_engine_table();
        assert_eq!(lookup_engine_tag(&table, "Boeing 737"), Some("twin_engine"));
        assert_eq!(lookup_engine_tag(&table, "Boeing 747"), Some("four_engine"));
        assert_eq!(lookup_engine_tag(&table, "Airbus A380"), Some("four_engine"));
        assert_eq!(lookup_engine_tag(&table, "F-16"), Some("single_engine"));
        assert_eq!(lookup_engine_tag(&table, "Cessna 172"), Some("single_engine"));
        assert_eq!(lookup_engine_tag(&table, "B-52"), Some("eight_engine"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = builtin_engine_table();
        assert_eq!(lookup_engine_tag(&table, "boeing 737"), None);
        assert_eq!(lookup_engine_tag(&table, "Boeing 737 "), None);
    }

    #[test]
    fn test_unknown_aircraft() {
        let table = builtin_engine_table();
        assert_eq!(lookup_engine_tag(&table, "Boeing 787"), None);
        assert_eq!(lookup_engine_tag(&table, ""), None);
    }

    #[test]
    fn test_engine_tag_counts() {
        assert_eq!(engine_tag(3), None);
        assert_eq!(engine_tag(0), None);
        assert_eq!(engine_tag(8), Some(TAG_EIGHT_ENGINE));
    }

    #[test]
    fn test_builtin_table_size() {
        assert_eq!(builtin_engine_table().len(), BUILTIN_ENGINES.len());
    }
}
