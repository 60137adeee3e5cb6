//! Translator
//!
//! Drives one shard: primitive → FilterChain → FeatureBuilder → Sink,
//! while counting every outcome in a private [`Accumulator`].
//!
//! # Lifecycle
//! ```text
//! template ──clone_for_shard──▶ shard 1 ──┐
//!          ──clone_for_shard──▶ shard 2 ──┼──merge──▶ final
//!          ──clone_for_shard──▶ shard N ──┘
//! ```
//!
//! Shared read-only: filter configuration, builder, geometry cache.
//! Shared thread-safe: sink.
//! Private: filter state, accumulator.

use std::sync::Arc;

use super::collectors::Collector;
use super::domain::{Accumulator, AccumulatorSnapshot, TranslationStats, TranslatorSignature};
use crate::errors::{Result, TranslatorError};
use crate::features::feature_building::{BuildError, FeatureBuilder};
use crate::features::filtering::FilterChain;
use crate::features::geometry_cache::GeometryCache;
use crate::features::sink::FeatureSink;
use crate::shared::models::RawPrimitive;
use crate::shared::CancellationToken;

/// Default number of failing primitive refs kept per accumulator
pub const DEFAULT_FAILURE_SAMPLE_CAP: usize = 64;

/// What happened to one primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// Dropped by the named filter
    Rejected { filter: String },

    /// Built; `emitted` features reached the sink
    Built {
        emitted: usize,
        filtered: usize,
        emit_failures: usize,
    },

    /// Geometry assembly failed, nothing emitted
    BuildFailed(BuildError),
}

/// Result of running a shard-local primitive sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShardReport {
    pub processed: u64,
    pub cancelled: bool,
}

pub struct Translator {
    signature: TranslatorSignature,
    filters: FilterChain,
    builder: Arc<dyn FeatureBuilder>,
    cache: Arc<dyn GeometryCache>,
    sink: Arc<dyn FeatureSink>,
    accumulator: Accumulator,
}

impl Translator {
    pub fn new(
        filters: FilterChain,
        builder: Arc<dyn FeatureBuilder>,
        cache: Arc<dyn GeometryCache>,
        sink: Arc<dyn FeatureSink>,
    ) -> Self {
        let accumulator = Accumulator::new(DEFAULT_FAILURE_SAMPLE_CAP, Vec::new());
        let signature = compute_signature(&filters, builder.as_ref(), &accumulator);
        Self {
            signature,
            filters,
            builder,
            cache,
            sink,
            accumulator,
        }
    }

    /// Replace the auxiliary collectors (template setup only)
    pub fn with_collectors(mut self, collectors: Vec<Box<dyn Collector>>) -> Self {
        self.accumulator = Accumulator::new(self.accumulator.failures().cap(), collectors);
        self.refresh_signature();
        self
    }

    /// Set how many failing primitive refs are kept (template setup only)
    pub fn with_failure_sample_cap(mut self, cap: usize) -> Self {
        let collectors = self
            .accumulator
            .collectors()
            .iter()
            .map(|c| c.clone_for_shard())
            .collect();
        self.accumulator = Accumulator::new(cap, collectors);
        self.refresh_signature();
        self
    }

    fn refresh_signature(&mut self) {
        self.signature = compute_signature(&self.filters, self.builder.as_ref(), &self.accumulator);
    }

    pub fn signature(&self) -> &TranslatorSignature {
        &self.signature
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn stats(&self) -> &TranslationStats {
        self.accumulator.stats()
    }

    pub fn snapshot(&self) -> AccumulatorSnapshot {
        self.accumulator.snapshot()
    }

    pub fn into_accumulator(self) -> Accumulator {
        self.accumulator
    }

    pub fn sink(&self) -> &Arc<dyn FeatureSink> {
        &self.sink
    }

    /// Process one primitive. Never fails: rejections, build failures and
    /// emit failures are recorded in the accumulator.
    pub fn translate(&mut self, primitive: &RawPrimitive) -> TranslateOutcome {
        self.accumulator.stats_mut().processed += 1;

        if let Some(index) = self.filters.first_rejection(primitive) {
            let filter = self.filters.name_at(index).unwrap_or("unknown").to_string();
            self.accumulator.stats_mut().record_rejection(&filter);
            return TranslateOutcome::Rejected { filter };
        }

        let features = match self.builder.build(primitive, self.cache.as_ref()) {
            Ok(features) => features,
            Err(err) => {
                tracing::debug!("Build failed ({}): {}", err.category(), err);
                self.accumulator.stats_mut().record_build_failure(err.category());
                self.accumulator.failures_mut().insert(primitive.reference());
                return TranslateOutcome::BuildFailed(err);
            }
        };

        self.accumulator.stats_mut().accepted += 1;

        let built = features.len();
        let features: Vec<_> = features
            .into_iter()
            .filter(|feature| self.filters.accept_feature(feature))
            .collect();
        let filtered = built - features.len();
        self.accumulator.stats_mut().features_rejected += filtered as u64;

        for collector in self.accumulator.collectors_mut() {
            collector.collect(primitive, &features);
        }

        let mut emitted = 0;
        let mut emit_failures = 0;
        for feature in features {
            let feature_type = feature.feature_type.clone();
            match self.sink.emit(feature) {
                Ok(()) => {
                    emitted += 1;
                    self.accumulator
                        .stats_mut()
                        .record_emitted(feature_type.as_str());
                }
                Err(err) => {
                    emit_failures += 1;
                    self.accumulator.stats_mut().emit_failures += 1;
                    tracing::warn!(
                        "Emit failed for {} ({}): {}",
                        primitive.reference(),
                        err.category(),
                        err
                    );
                }
            }
        }

        TranslateOutcome::Built {
            emitted,
            filtered,
            emit_failures,
        }
    }

    /// Process a shard-local sequence in order, checking for cancellation
    /// before each primitive.
    pub fn translate_all<'a, I>(&mut self, primitives: I, cancel: &CancellationToken) -> ShardReport
    where
        I: IntoIterator<Item = &'a RawPrimitive>,
    {
        let mut report = ShardReport::default();
        for primitive in primitives {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            self.translate(primitive);
            report.processed += 1;
        }
        report
    }

    /// Independent translator for a new shard
    ///
    /// Shares the builder, cache and sink, gets its own filter instances
    /// and starts with an empty accumulator. The template is not modified.
    pub fn clone_for_shard(&self) -> Translator {
        Translator {
            signature: self.signature.clone(),
            filters: self.filters.clone_for_shard(),
            builder: Arc::clone(&self.builder),
            cache: Arc::clone(&self.cache),
            sink: Arc::clone(&self.sink),
            accumulator: self.accumulator.empty_like(),
        }
    }

    /// Fold `source`'s accumulator into this one
    ///
    /// `source` is consumed. Fails without modifying `self` when the two
    /// translators were configured differently.
    pub fn merge(&mut self, source: Translator) -> Result<()> {
        if self.signature != source.signature {
            tracing::warn!("Refusing merge: {} into {}", source.signature, self.signature);
            return Err(TranslatorError::config_mismatch(
                &self.signature,
                &source.signature,
            ));
        }
        tracing::debug!(
            "Merging shard ({} processed) into ({} processed)",
            source.stats().processed,
            self.stats().processed
        );
        self.accumulator.absorb(source.accumulator)
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("signature", &self.signature)
            .field("accumulator", &self.accumulator)
            .finish()
    }
}

fn compute_signature(
    filters: &FilterChain,
    builder: &dyn FeatureBuilder,
    accumulator: &Accumulator,
) -> TranslatorSignature {
    TranslatorSignature {
        filters: filters.signatures(),
        builder: builder.signature(),
        collectors: accumulator.collector_names(),
        failure_sample_cap: accumulator.failures().cap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderConfig;
    use crate::features::feature_building::FeatureMaker;
    use crate::features::filtering::{PlanetFilter, RequiredTagFilter};
    use crate::features::geometry_cache::InMemoryGeometryCache;
    use crate::features::sink::{CollectingSink, EmitError};
    use crate::features::translation::collectors::TagKeyCollector;
    use crate::shared::models::{Coord, Feature, Geometry, PrimitiveRef};

    struct FailingSink;

    impl FeatureSink for FailingSink {
        fn emit(&self, _feature: Feature) -> std::result::Result<(), EmitError> {
            Err(EmitError::rejected("disk full"))
        }
    }

    fn cache() -> Arc<InMemoryGeometryCache> {
        InMemoryGeometryCache::builder()
            .with(PrimitiveRef::point(1), Geometry::Point(Coord::new(0.0, 0.0)))
            .with(PrimitiveRef::point(2), Geometry::Point(Coord::new(1.0, 1.0)))
            .build()
    }

    fn translator(sink: Arc<dyn FeatureSink>) -> Translator {
        Translator::new(
            FilterChain::new().append_shared(PlanetFilter::new()),
            Arc::new(FeatureMaker::new(BuilderConfig::default())),
            cache(),
            sink,
        )
    }

    #[test]
    fn test_outcomes() {
        let sink = Arc::new(CollectingSink::new());
        let mut t = translator(sink.clone());

        let cafe = RawPrimitive::point(1).with_tag("amenity", "cafe");
        let untagged = RawPrimitive::point(2);
        let missing = RawPrimitive::point(3).with_tag("amenity", "bar");

        assert_eq!(
            t.translate(&cafe),
            TranslateOutcome::Built {
                emitted: 1,
                filtered: 0,
                emit_failures: 0
            }
        );
        assert_eq!(
            t.translate(&untagged),
            TranslateOutcome::Rejected {
                filter: "planet".to_string()
            }
        );
        assert!(matches!(t.translate(&missing), TranslateOutcome::BuildFailed(_)));

        let stats = t.stats();
        assert_eq!((stats.accepted, stats.rejected, stats.build_failures), (1, 1, 1));
        assert!(stats.is_consistent());
        assert_eq!(sink.len(), 1);
        assert!(t.accumulator().failures().contains(&PrimitiveRef::point(3)));
    }

    #[test]
    fn test_emit_failure_does_not_stop_shard() {
        let mut t = translator(Arc::new(FailingSink));
        let primitives = vec![
            RawPrimitive::point(1).with_tag("amenity", "cafe"),
            RawPrimitive::point(2).with_tag("amenity", "bar"),
        ];

        let report = t.translate_all(&primitives, &CancellationToken::new());
        assert_eq!(report.processed, 2);
        assert_eq!(t.stats().emit_failures, 2);
        assert_eq!(t.stats().accepted, 2);
        assert_eq!(t.stats().features_emitted, 0);
    }

    #[test]
    fn test_cancelled_shard_stops() {
        let mut t = translator(Arc::new(CollectingSink::new()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let primitives = vec![RawPrimitive::point(1).with_tag("amenity", "cafe")];
        let report = t.translate_all(&primitives, &cancel);
        assert!(report.cancelled);
        assert_eq!(report.processed, 0);
        assert_eq!(t.stats().processed, 0);
    }

    #[test]
    fn test_clone_starts_empty_and_isolated() {
        let sink = Arc::new(CollectingSink::new());
        let mut template = translator(sink).with_collectors(vec![Box::new(TagKeyCollector::new())]);
        template.translate(&RawPrimitive::point(1).with_tag("amenity", "cafe"));

        let mut shard = template.clone_for_shard();
        assert_eq!(shard.stats().processed, 0);
        assert_eq!(shard.signature(), template.signature());

        shard.translate(&RawPrimitive::point(2).with_tag("amenity", "bar"));
        assert_eq!(template.stats().processed, 1);
        assert_eq!(shard.stats().processed, 1);
    }

    #[test]
    fn test_merge_mismatch_leaves_target_untouched() {
        let sink: Arc<dyn FeatureSink> = Arc::new(CollectingSink::new());
        let mut target = translator(sink.clone());
        target.translate(&RawPrimitive::point(1).with_tag("amenity", "cafe"));
        let before = target.snapshot();

        let other = Translator::new(
            FilterChain::new().append_shared(RequiredTagFilter::new("amenity")),
            Arc::new(FeatureMaker::new(BuilderConfig::default())),
            cache(),
            sink,
        );

        let err = target.merge(other).unwrap_err();
        assert_eq!(err.category(), "config_mismatch");
        assert_eq!(target.snapshot(), before);
    }

    /// Records how many features each collected primitive carried
    #[derive(Default)]
    struct FeatureCountCollector {
        seen: Vec<usize>,
    }

    impl Collector for FeatureCountCollector {
        fn name(&self) -> &str {
            "feature_counts"
        }

        fn collect(&mut self, _primitive: &RawPrimitive, features: &[Feature]) {
            self.seen.push(features.len());
        }

        fn clone_for_shard(&self) -> Box<dyn Collector> {
            Box::new(FeatureCountCollector::default())
        }

        fn merge(&mut self, other: Box<dyn Collector>) -> Result<()> {
            let other = crate::features::translation::collectors::downcast_peer(self, other)?;
            self.seen.extend(other.seen);
            Ok(())
        }

        fn report(&self) -> serde_json::Value {
            serde_json::json!(self.seen)
        }

        fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
            self
        }
    }

    /// Drops built features of one type
    struct DropFeatureType(&'static str);

    impl crate::features::filtering::StatelessFilter for DropFeatureType {
        fn name(&self) -> &str {
            "drop_feature_type"
        }

        fn accept(&self, _primitive: &RawPrimitive) -> bool {
            true
        }

        fn accept_feature(&self, feature: &Feature) -> bool {
            feature.feature_type.as_str() != self.0
        }
    }

    #[test]
    fn test_collectors_see_only_features_that_pass_feature_filters() {
        let sink = Arc::new(CollectingSink::new());
        let mut t = Translator::new(
            FilterChain::new().append_shared(DropFeatureType("amenity-bar")),
            Arc::new(FeatureMaker::new(BuilderConfig::default())),
            cache(),
            sink.clone(),
        )
        .with_collectors(vec![Box::new(FeatureCountCollector::default())]);

        t.translate(&RawPrimitive::point(1).with_tag("amenity", "cafe"));
        let outcome = t.translate(&RawPrimitive::point(2).with_tag("amenity", "bar"));

        assert_eq!(
            outcome,
            TranslateOutcome::Built {
                emitted: 0,
                filtered: 1,
                emit_failures: 0
            }
        );
        assert_eq!(t.accumulator().collectors()[0].report(), serde_json::json!([1, 0]));
        assert_eq!(t.stats().features_rejected, 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_sample_cap_is_part_of_signature() {
        let sink: Arc<dyn FeatureSink> = Arc::new(CollectingSink::new());
        let a = translator(sink.clone());
        let b = translator(sink).with_failure_sample_cap(2);
        assert_ne!(a.signature(), b.signature());
    }
}
