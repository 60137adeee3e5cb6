//! Shard orchestrator
//!
//! Scatter clones, gather via fold:
//!
//! ```text
//! primitives ──partition──▶ [p0][p1][p2][p3]
//!                              │   │   │   │   clone_for_shard + translate_all (rayon)
//!                              ▼   ▼   ▼   ▼
//!                             t0  t1  t2  t3     arena of shard translators
//!                              └─┬─┘   └─┬─┘
//!                               t01     t23      tree reduction (or chain)
//!                                 └──┬──┘
//!                                  final
//! ```
//!
//! Shards never touch each other's accumulators; merging happens only after
//! every shard has finished.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::result::{RunMetadata, TranslationRun};
use crate::config::{OrchestratorConfig, ReductionStrategy, Validatable};
use crate::errors::Result;
use crate::features::translation::{ShardReport, Translator};
use crate::shared::models::RawPrimitive;
use crate::shared::CancellationToken;

pub struct ShardOrchestrator {
    workers: usize,
    shards: usize,
    reduction: ReductionStrategy,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl ShardOrchestrator {
    pub fn new(config: &OrchestratorConfig) -> Result<Self> {
        config.validate()?;
        let workers = config.resolved_workers();

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("geogen-shard-{}", i))
            .build()
            .map_err(|e| {
                crate::errors::TranslatorError::internal(format!("Failed to build thread pool: {}", e))
            })?;

        Ok(Self {
            workers,
            shards: config.resolved_shards(),
            reduction: config.reduction,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn shards(&self) -> usize {
        self.shards
    }

    pub fn reduction(&self) -> ReductionStrategy {
        self.reduction
    }

    /// Split `primitives` into contiguous shards and translate them
    pub fn run(
        &self,
        template: &Translator,
        primitives: &[RawPrimitive],
        cancel: &CancellationToken,
    ) -> Result<TranslationRun> {
        let partitions = partition(primitives, self.shards);
        self.run_partitions(template, &partitions, cancel)
    }

    /// Translate caller-supplied shards
    ///
    /// Partitions must be disjoint; the merged accumulator does not depend
    /// on how they were cut.
    pub fn run_partitions(
        &self,
        template: &Translator,
        partitions: &[&[RawPrimitive]],
        cancel: &CancellationToken,
    ) -> Result<TranslationRun> {
        let start = Instant::now();
        let total: usize = partitions.iter().map(|p| p.len()).sum();
        tracing::info!(
            "Translating {} primitives in {} shards on {} workers",
            total,
            partitions.len(),
            self.workers
        );

        let (translators, reports): (Vec<Translator>, Vec<ShardReport>) =
            self.scatter(template, partitions, cancel).into_iter().unzip();

        let cancelled = reports.iter().any(|r| r.cancelled);
        let processed: u64 = reports.iter().map(|r| r.processed).sum();
        if cancelled {
            tracing::warn!("Run cancelled after {} of {} primitives", processed, total);
        }

        let translator = match self.gather(translators)? {
            Some(merged) => merged,
            None => template.clone_for_shard(),
        };

        let metadata = RunMetadata {
            shards: partitions.len(),
            workers: self.workers,
            reduction: self.reduction,
            processed,
            cancelled,
            duration: start.elapsed(),
        };
        tracing::info!(
            "Translation finished in {:?}: {}",
            metadata.duration,
            translator.stats().summary()
        );

        Ok(TranslationRun {
            translator,
            metadata,
        })
    }

    #[cfg(feature = "parallel")]
    fn scatter(
        &self,
        template: &Translator,
        partitions: &[&[RawPrimitive]],
        cancel: &CancellationToken,
    ) -> Vec<(Translator, ShardReport)> {
        self.pool.install(|| {
            partitions
                .par_iter()
                .enumerate()
                .map(|(index, part)| run_shard(template, index, part, cancel))
                .collect()
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn scatter(
        &self,
        template: &Translator,
        partitions: &[&[RawPrimitive]],
        cancel: &CancellationToken,
    ) -> Vec<(Translator, ShardReport)> {
        partitions
            .iter()
            .enumerate()
            .map(|(index, part)| run_shard(template, index, part, cancel))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn gather(&self, translators: Vec<Translator>) -> Result<Option<Translator>> {
        self.pool.install(|| reduce(translators, self.reduction))
    }

    #[cfg(not(feature = "parallel"))]
    fn gather(&self, translators: Vec<Translator>) -> Result<Option<Translator>> {
        reduce(translators, self.reduction)
    }
}

impl std::fmt::Debug for ShardOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardOrchestrator")
            .field("workers", &self.workers)
            .field("shards", &self.shards)
            .field("reduction", &self.reduction)
            .finish()
    }
}

fn run_shard(
    template: &Translator,
    index: usize,
    part: &[RawPrimitive],
    cancel: &CancellationToken,
) -> (Translator, ShardReport) {
    let mut translator = template.clone_for_shard();
    let report = translator.translate_all(part, cancel);
    tracing::debug!(
        "Shard {} done: {}/{} primitives{}",
        index,
        report.processed,
        part.len(),
        if report.cancelled { " (cancelled)" } else { "" }
    );
    (translator, report)
}

/// Split `items` into at most `shards` contiguous, non-empty slices whose
/// lengths differ by at most one
pub fn partition<T>(items: &[T], shards: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    let shards = shards.clamp(1, items.len());
    let base = items.len() / shards;
    let extra = items.len() % shards;

    let mut slices = Vec::with_capacity(shards);
    let mut start = 0;
    for i in 0..shards {
        let len = base + usize::from(i < extra);
        slices.push(&items[start..start + len]);
        start += len;
    }
    slices
}

/// Fold shard translators into one
///
/// Returns `None` for an empty arena. Any configuration mismatch aborts the
/// reduction.
pub fn reduce(translators: Vec<Translator>, strategy: ReductionStrategy) -> Result<Option<Translator>> {
    match strategy {
        ReductionStrategy::Chain => {
            let mut iter = translators.into_iter();
            let Some(mut target) = iter.next() else {
                return Ok(None);
            };
            for source in iter {
                target.merge(source)?;
            }
            Ok(Some(target))
        }
        ReductionStrategy::Tree => {
            let mut level = translators;
            while level.len() > 1 {
                let mut pairs = Vec::with_capacity(level.len().div_ceil(2));
                let mut iter = level.into_iter();
                while let Some(left) = iter.next() {
                    pairs.push((left, iter.next()));
                }
                level = merge_round(pairs)?;
            }
            Ok(level.pop())
        }
    }
}

#[cfg(feature = "parallel")]
fn merge_round(pairs: Vec<(Translator, Option<Translator>)>) -> Result<Vec<Translator>> {
    pairs.into_par_iter().map(|(a, b)| merge_pair(a, b)).collect()
}

#[cfg(not(feature = "parallel"))]
fn merge_round(pairs: Vec<(Translator, Option<Translator>)>) -> Result<Vec<Translator>> {
    pairs.into_iter().map(|(a, b)| merge_pair(a, b)).collect()
}

fn merge_pair(mut target: Translator, source: Option<Translator>) -> Result<Translator> {
    if let Some(source) = source {
        target.merge(source)?;
    }
    Ok(target)
}
