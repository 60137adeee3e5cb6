//! End-to-end: JSON cache + JSON-lines primitives → orchestrator → sinks

mod common;

use common::*;
use geogen_translator::config::{OrchestratorConfig, ReductionStrategy, TranslatorConfig};
use geogen_translator::features::sink::{JsonLinesSink, PartitionedSink};
use geogen_translator::pipeline::read_primitives_file;
use geogen_translator::{
    CancellationToken, CollectingSink, EmitError, Feature, FeatureSink, FeatureType, GeometryCache,
    InMemoryGeometryCache, ShardOrchestrator,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const CACHE_JSON: &str = r#"[
  {"kind": "point", "id": 1, "geometry": {"type": "point", "coordinates": {"lat": 0.0, "lon": 0.0}}},
  {"kind": "point", "id": 2, "geometry": {"type": "point", "coordinates": {"lat": 0.0, "lon": 1.0}}},
  {"kind": "point", "id": 3, "geometry": {"type": "point", "coordinates": {"lat": 1.0, "lon": 1.0}}}
]"#;

const PRIMITIVES_JSONL: &str = r#"{"kind":"point","id":1,"tags":{"amenity":"cafe","name":"Blue"}}
{"kind":"point","id":2}
{"kind":"line","id":10,"refs":[1,2,3,1],"tags":{"building":"yes"}}
{"kind":"line","id":11,"refs":[1,42],"tags":{"highway":"path"}}
{"kind":"point","id":3,"tags":{"amenity":"bench"}}
"#;

fn orchestrator(shards: usize) -> ShardOrchestrator {
    ShardOrchestrator::new(&OrchestratorConfig {
        workers: 2,
        shards,
        reduction: ReductionStrategy::Tree,
    })
    .unwrap()
}

#[test]
fn test_files_to_json_lines() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let input_path = dir.path().join("primitives.jsonl");
    let output_path = dir.path().join("features.jsonl");
    fs::write(&cache_path, CACHE_JSON).unwrap();
    fs::write(&input_path, PRIMITIVES_JSONL).unwrap();

    let cache = InMemoryGeometryCache::from_json_file(&cache_path).unwrap();
    assert_eq!(cache.len(), 3);
    let primitives = read_primitives_file(&input_path).unwrap();

    let sink = Arc::new(JsonLinesSink::create(&output_path).unwrap());
    let template = TranslatorConfig::default()
        .build_translator(cache, sink.clone())
        .unwrap();
    let run = orchestrator(3)
        .run(&template, &primitives, &CancellationToken::new())
        .unwrap();
    sink.flush().unwrap();

    let stats = run.translator.stats();
    assert_eq!(stats.processed, 5);
    assert_eq!(stats.accepted, 3);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.build_failures, 1);
    assert_stats_consistent(stats);
    assert!(!run.metadata.cancelled);

    let text = fs::read_to_string(&output_path).unwrap();
    let mut features: Vec<Feature> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    features.sort_by(|a, b| a.source.cmp(&b.source));
    assert_eq!(
        feature_types(&features),
        vec!["amenity-cafe", "amenity-bench", "building-yes"]
    );
    assert_eq!(features[2].geometry.kind_name(), "area");

    let report = serde_json::to_value(run.report()).unwrap();
    assert_eq!(report["metadata"]["shards"], 3);
    assert_eq!(report["accumulator"]["failure_samples"][0], "line/11");
}

#[test]
fn test_partitioned_sink_matches_shard_count_changes() {
    let primitives = mixed_primitives(90);

    let mut per_type = Vec::new();
    for shards in [1, 4, 13] {
        let sink = Arc::new(PartitionedSink::new());
        let template = planet_template(sink.clone());
        let run = orchestrator(shards)
            .run(&template, &primitives, &CancellationToken::new())
            .unwrap();
        assert_eq!(sink.total() as u64, run.translator.stats().features_emitted);
        per_type.push(sink.counts());
    }

    assert_eq!(per_type[0], per_type[1]);
    assert_eq!(per_type[1], per_type[2]);
    assert!(per_type[0].contains_key(&FeatureType::new("amenity-bench")));
}

/// Collects features and cancels the run once `limit` have arrived
struct CancellingSink {
    inner: CollectingSink,
    cancel: CancellationToken,
    limit: usize,
}

impl FeatureSink for CancellingSink {
    fn emit(&self, feature: Feature) -> Result<(), EmitError> {
        self.inner.emit(feature)?;
        if self.inner.len() >= self.limit {
            self.cancel.cancel();
        }
        Ok(())
    }
}

#[test]
fn test_cancel_mid_run_keeps_emitted_features() {
    let primitives = mixed_primitives(600);
    let cancel = CancellationToken::new();
    let sink = Arc::new(CancellingSink {
        inner: CollectingSink::new(),
        cancel: cancel.clone(),
        limit: 10,
    });
    let template = planet_template(sink.clone());

    let run = orchestrator(2).run(&template, &primitives, &cancel).unwrap();

    assert!(run.metadata.cancelled);
    assert!(run.metadata.processed < primitives.len() as u64);
    assert_eq!(run.translator.stats().processed, run.metadata.processed);
    assert_stats_consistent(run.translator.stats());

    // Nothing emitted is rolled back
    assert_eq!(sink.inner.len() as u64, run.translator.stats().features_emitted);
}
