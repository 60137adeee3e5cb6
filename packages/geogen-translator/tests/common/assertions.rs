//! Custom assertions

use geogen_translator::features::translation::TranslationStats;
use geogen_translator::Feature;

/// Every processed primitive ended in exactly one outcome
pub fn assert_stats_consistent(stats: &TranslationStats) {
    assert!(
        stats.is_consistent(),
        "accepted ({}) + rejected ({}) + build_failures ({}) != processed ({})",
        stats.accepted,
        stats.rejected,
        stats.build_failures,
        stats.processed
    );
}

/// Source ids of emitted features, sorted
pub fn sorted_sources(features: &[Feature]) -> Vec<String> {
    let mut sources: Vec<String> = features.iter().map(|f| f.source.to_string()).collect();
    sources.sort();
    sources
}
