//! Translation statistics
//!
//! Plain counters owned by one shard. Merging sums every counter and every
//! per-key map, which is associative and commutative.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationStats {
    /// Primitives handed to the translator
    pub processed: u64,

    /// Passed every filter and built successfully
    pub accepted: u64,

    /// Dropped by a filter
    pub rejected: u64,

    /// Passed filtering, geometry assembly failed
    pub build_failures: u64,

    /// Features the sink refused
    pub emit_failures: u64,

    /// Features delivered to the sink
    pub features_emitted: u64,

    /// Built features dropped by the feature-level filters
    pub features_rejected: u64,

    pub rejected_by_filter: BTreeMap<String, u64>,

    pub failures_by_category: BTreeMap<String, u64>,

    pub features_by_type: BTreeMap<String, u64>,
}

impl TranslationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_rejection(&mut self, filter: &str) {
        self.rejected += 1;
        *self.rejected_by_filter.entry(filter.to_string()).or_insert(0) += 1;
    }

    pub fn record_build_failure(&mut self, category: &str) {
        self.build_failures += 1;
        *self
            .failures_by_category
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    pub fn record_emitted(&mut self, feature_type: &str) {
        self.features_emitted += 1;
        *self
            .features_by_type
            .entry(feature_type.to_string())
            .or_insert(0) += 1;
    }

    /// Pointwise sum
    pub fn merge(&mut self, other: TranslationStats) {
        self.processed += other.processed;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.build_failures += other.build_failures;
        self.emit_failures += other.emit_failures;
        self.features_emitted += other.features_emitted;
        self.features_rejected += other.features_rejected;
        merge_counts(&mut self.rejected_by_filter, other.rejected_by_filter);
        merge_counts(&mut self.failures_by_category, other.failures_by_category);
        merge_counts(&mut self.features_by_type, other.features_by_type);
    }

    /// Every processed primitive ends in exactly one of the three outcomes
    pub fn is_consistent(&self) -> bool {
        self.accepted + self.rejected + self.build_failures == self.processed
    }

    pub fn summary(&self) -> String {
        format!(
            "{} processed, {} accepted, {} rejected, {} build failures, {} features emitted, {} emit failures",
            self.processed,
            self.accepted,
            self.rejected,
            self.build_failures,
            self.features_emitted,
            self.emit_failures
        )
    }
}

fn merge_counts(target: &mut BTreeMap<String, u64>, source: BTreeMap<String, u64>) {
    for (key, count) in source {
        *target.entry(key).or_insert(0) += count;
    }
}
