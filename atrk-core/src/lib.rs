//! atrk-core: Airborne track codec and behavioral tagging library.
//!
//! No async and no file I/O beyond config loading. Callers hand in
//! a byte buffer or a track list and get back tracks or tag sets.

pub mod aircraft;
pub mod codec;
pub mod config;
pub mod features;
pub mod report;
pub mod tags;
pub mod types;

// Re-export commonly used types at crate root
pub use codec::{decode, encode};
pub use config::TagConfig;
pub use features::{extract, FeatureSummary};
pub use report::{generate_tags, TagStatistics, TrackTags};
pub use tags::{TagClassifier, TagSet};
pub use types::*;
