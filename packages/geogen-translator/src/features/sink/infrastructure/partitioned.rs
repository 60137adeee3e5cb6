//! Sink bucketing features by feature type
//!
//! Shards emitting different types do not contend: each type lives in its
//! own `DashMap` shard.

use dashmap::DashMap;
use std::collections::BTreeMap;

use super::super::ports::{EmitError, FeatureSink};
use crate::shared::models::{Feature, FeatureType};

#[derive(Debug, Default)]
pub struct PartitionedSink {
    buckets: DashMap<FeatureType, Vec<Feature>>,
}

impl PartitionedSink {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Feature count per type, ordered by type
    pub fn counts(&self) -> BTreeMap<FeatureType, usize> {
        self.buckets
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().len()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|entry| entry.value().len()).sum()
    }

    /// Remove and return one bucket, ordered by source primitive
    ///
    /// Features of one source keep their emission order.
    pub fn take(&self, feature_type: &FeatureType) -> Vec<Feature> {
        let mut features = self
            .buckets
            .remove(feature_type)
            .map(|(_, features)| features)
            .unwrap_or_default();
        features.sort_by_key(|feature| feature.source);
        features
    }
}

impl FeatureSink for PartitionedSink {
    fn emit(&self, feature: Feature) -> Result<(), EmitError> {
        self.buckets
            .entry(feature.feature_type.clone())
            .or_default()
            .push(feature);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Coord, Geometry, PrimitiveRef};

    fn feature(id: i64, feature_type: &str) -> Feature {
        Feature::new(
            PrimitiveRef::point(id),
            FeatureType::new(feature_type),
            Geometry::Point(Coord::new(0.0, 0.0)),
        )
    }

    #[test]
    fn test_buckets() {
        let sink = PartitionedSink::new();
        sink.emit(feature(1, "amenity-cafe")).unwrap();
        sink.emit(feature(2, "amenity-cafe")).unwrap();
        sink.emit(feature(3, "shop-bakery")).unwrap();

        let counts = sink.counts();
        assert_eq!(counts[&FeatureType::new("amenity-cafe")], 2);
        assert_eq!(sink.total(), 3);

        let bakeries = sink.take(&FeatureType::new("shop-bakery"));
        assert_eq!(bakeries.len(), 1);
        assert_eq!(sink.total(), 2);
    }

    #[test]
    fn test_take_orders_by_source() {
        let sink = PartitionedSink::new();
        for id in [7, 2, 9, 2] {
            sink.emit(feature(id, "amenity-cafe")).unwrap();
        }

        let sources: Vec<i64> = sink
            .take(&FeatureType::new("amenity-cafe"))
            .iter()
            .map(|f| f.source.id)
            .collect();
        assert_eq!(sources, vec![2, 2, 7, 9]);
    }
}
