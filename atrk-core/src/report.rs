//! Collection-level tagging and tag statistics.
//!
//! Tracks are independent: nothing here carries state from one track to the
//! next, and results come back in input order.

use std::collections::HashMap;

use serde::Serialize;

use crate::features::{self, FeatureSummary};
use crate::tags::{TagClassifier, TagSet};
use crate::types::Track;

/// Tags and features for one track, in the order the track appeared.
#[derive(Debug, Clone, Serialize)]
pub struct TrackTags {
    pub track_id: u32,
    pub track_name: String,
    pub tags: TagSet,
    pub features: FeatureSummary,
}

impl TrackTags {
    /// Tag column value for tabular exports.
    pub fn tag_column(&self) -> String {
        tag_column(&self.tags)
    }
}

/// Join tags with `"; "`. Empty for an empty set.
pub fn tag_column(tags: &TagSet) -> String {
    tags.to_string()
}

/// Extract features and classify every track, preserving input order.
pub fn generate_tags(classifier: &TagClassifier, tracks: &[Track]) -> Vec<TrackTags> {
    tracks
        .iter()
        .map(|track| {
            let features = features::extract(track);
            let tags = classifier.classify(track, &features);
            TrackTags {
                track_id: track.track_id,
                track_name: track.track_name.clone(),
                tags,
                features,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Tag frequencies across a tagged collection.
#[derive(Debug, Clone, Default)]
pub struct TagStatistics {
    pub tracks: usize,
    /// Distinct tag column values.
    pub unique_combinations: usize,
    counts: HashMap<&'static str, usize>,
}

impl TagStatistics {
    pub fn from_results(results: &[TrackTags]) -> Self {
        let mut counts: HashMap<&'static str, usize> = HashMap::new();
        let mut combos: Vec<String> = Vec::with_capacity(results.len());

        for r in results {
            for tag in r.tags.iter() {
                *counts.entry(tag).or_insert(0) += 1;
            }
            combos.push(r.tag_column());
        }
        combos.sort();
        combos.dedup();

        TagStatistics {
            tracks: results.len(),
            unique_combinations: combos.len(),
            counts,
        }
    }

    /// Number of distinct tags seen.
    pub fn unique_tags(&self) -> usize {
        self.counts.len()
    }

    /// Number of tracks carrying `tag`.
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Up to `n` tags by descending count; ties sort alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&'static str, usize)> {
        let mut sorted: Vec<(&'static str, usize)> =
            self.counts.iter().map(|(t, c)| (*t, *c)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted.truncate(n);
        sorted
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
