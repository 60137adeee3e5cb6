//! Per-shard accumulator
//!
//! ```text
//! Accumulator
//! ├── stats: TranslationStats        // counters, summed on merge
//! ├── failures: FailureSamples       // smallest failing refs, union on merge
//! └── collectors: Vec<Box<dyn Collector>>  // merged pairwise by position
//! ```
//!
//! Owned by exactly one translator. Never shared, never locked.

use serde::Serialize;
use std::collections::BTreeMap;

use super::failure_samples::FailureSamples;
use super::stats::TranslationStats;
use crate::errors::{Result, TranslatorError};
use crate::features::translation::collectors::Collector;

pub struct Accumulator {
    stats: TranslationStats,
    failures: FailureSamples,
    collectors: Vec<Box<dyn Collector>>,
}

/// Comparable, serializable view of an accumulator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccumulatorSnapshot {
    pub stats: TranslationStats,
    pub failure_samples: Vec<String>,
    pub collectors: BTreeMap<String, serde_json::Value>,
}

impl Accumulator {
    pub fn new(failure_sample_cap: usize, collectors: Vec<Box<dyn Collector>>) -> Self {
        Self {
            stats: TranslationStats::new(),
            failures: FailureSamples::new(failure_sample_cap),
            collectors,
        }
    }

    /// Empty accumulator with the same configuration
    pub fn empty_like(&self) -> Self {
        Self {
            stats: TranslationStats::new(),
            failures: FailureSamples::new(self.failures.cap()),
            collectors: self.collectors.iter().map(|c| c.clone_for_shard()).collect(),
        }
    }

    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut TranslationStats {
        &mut self.stats
    }

    pub fn failures(&self) -> &FailureSamples {
        &self.failures
    }

    pub fn failures_mut(&mut self) -> &mut FailureSamples {
        &mut self.failures
    }

    pub fn collectors(&self) -> &[Box<dyn Collector>] {
        &self.collectors
    }

    pub fn collectors_mut(&mut self) -> &mut [Box<dyn Collector>] {
        &mut self.collectors
    }

    pub fn collector_names(&self) -> Vec<String> {
        self.collectors.iter().map(|c| c.name().to_string()).collect()
    }

    /// Fold `other` into `self`
    ///
    /// Collector lists must line up name for name; otherwise nothing is
    /// changed and a configuration mismatch is returned.
    pub fn absorb(&mut self, other: Accumulator) -> Result<()> {
        if self.collector_names() != other.collector_names()
            || self.failures.cap() != other.failures.cap()
        {
            return Err(TranslatorError::component_mismatch(
                format!("collectors={:?} samples={}", self.collector_names(), self.failures.cap()),
                format!("collectors={:?} samples={}", other.collector_names(), other.failures.cap()),
            ));
        }

        self.stats.merge(other.stats);
        self.failures.merge(other.failures);
        for (target, source) in self.collectors.iter_mut().zip(other.collectors) {
            target.merge(source)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> AccumulatorSnapshot {
        AccumulatorSnapshot {
            stats: self.stats.clone(),
            failure_samples: self.failures.iter().map(ToString::to_string).collect(),
            collectors: self
                .collectors
                .iter()
                .map(|c| (c.name().to_string(), c.report()))
                .collect(),
        }
    }
}

impl std::fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accumulator")
            .field("stats", &self.stats)
            .field("failures", &self.failures.len())
            .field("collectors", &self.collector_names())
            .finish()
    }
}
