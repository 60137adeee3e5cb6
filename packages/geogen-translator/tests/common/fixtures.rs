//! Test fixtures
//!
//! Geometry layout of [`sample_cache`]:
//! - points 0..40 on a grid
//! - lines 100..106 closed squares, lines 106..110 open
//!
//! Anything else is missing on purpose.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use geogen_translator::config::BuilderConfig;
use geogen_translator::features::filtering::{PlanetFilter, RequiredTagFilter};
use geogen_translator::features::translation::{Collector, TagKeyCollector, TaggedIdCollector};
use geogen_translator::{
    Coord, Feature, FeatureMaker, FeatureSink, Filter, FilterChain, Geometry, InMemoryGeometryCache,
    PrimitiveRef, RawPrimitive, Translator,
};

pub const CACHED_POINTS: i64 = 40;

fn square(offset: f64) -> Vec<Coord> {
    vec![
        Coord::new(offset, offset),
        Coord::new(offset, offset + 1.0),
        Coord::new(offset + 1.0, offset + 1.0),
        Coord::new(offset, offset),
    ]
}

pub fn sample_cache() -> Arc<InMemoryGeometryCache> {
    let mut builder = InMemoryGeometryCache::builder();
    for id in 0..CACHED_POINTS {
        builder.insert(
            PrimitiveRef::point(id),
            Geometry::Point(Coord::new((id / 8) as f64, (id % 8) as f64)),
        );
    }
    for id in 100..106 {
        builder.insert(PrimitiveRef::line(id), Geometry::Line(square(id as f64)));
    }
    for id in 106..110 {
        builder.insert(
            PrimitiveRef::line(id),
            Geometry::Line(vec![Coord::new(0.0, id as f64), Coord::new(1.0, id as f64)]),
        );
    }
    builder.build()
}

/// Filter that counts how often it is asked and accepts everything
#[derive(Debug, Clone)]
pub struct CountingFilter {
    name: String,
    calls: Arc<AtomicUsize>,
}

impl CountingFilter {
    pub fn new(name: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: name.to_string(),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl Filter for CountingFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept(&mut self, _primitive: &RawPrimitive) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn clone_for_shard(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

pub fn default_collectors() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(TagKeyCollector::new()),
        Box::new(TaggedIdCollector::new("landuse")),
    ]
}

/// planet → required_tag:name, default builder, collectors attached
pub fn scenario_template(sink: Arc<dyn FeatureSink>) -> Translator {
    Translator::new(
        FilterChain::new()
            .append_shared(PlanetFilter::new())
            .append_shared(RequiredTagFilter::new("name")),
        Arc::new(FeatureMaker::new(BuilderConfig::default())),
        sample_cache(),
        sink,
    )
    .with_collectors(default_collectors())
}

/// planet only, default builder, collectors attached
pub fn planet_template(sink: Arc<dyn FeatureSink>) -> Translator {
    Translator::new(
        FilterChain::new().append_shared(PlanetFilter::new()),
        Arc::new(FeatureMaker::new(BuilderConfig::default())),
        sample_cache(),
        sink,
    )
    .with_collectors(default_collectors())
}

/// P1 accepted with geometry, P2 rejected by the second filter, P3
/// accepted with a dangling geometry reference
pub fn scenario_primitives() -> [RawPrimitive; 3] {
    [
        RawPrimitive::point(1)
            .with_tag("amenity", "cafe")
            .with_tag("name", "Blue Door"),
        RawPrimitive::point(2).with_tag("amenity", "bench"),
        RawPrimitive::point(999)
            .with_tag("amenity", "pub")
            .with_tag("name", "Nowhere"),
    ]
}

/// Deterministic primitive from small seeds
///
/// `index` becomes the id, so a generated set never repeats an identity.
/// Some outcomes per kind: points past [`CACHED_POINTS`] dangle, line refs
/// past 50 dangle, relations over open lines are malformed.
pub fn seeded_primitive(index: usize, kind: u8, tag: u8, refs: &[u8]) -> RawPrimitive {
    let id = index as i64;
    let primitive = match kind % 3 {
        0 => RawPrimitive::point(id),
        1 => {
            let refs: Vec<i64> = refs.iter().map(|r| i64::from(*r % 50)).collect();
            RawPrimitive::line(id, refs)
        }
        _ => {
            let members: Vec<i64> = refs.iter().map(|r| 100 + i64::from(*r % 12)).collect();
            RawPrimitive::relation(id, members).with_tag("type", "multipolygon")
        }
    };

    match tag % 5 {
        0 => primitive,
        1 => primitive.with_tag("amenity", "bench"),
        2 => primitive.with_tag("highway", "footway"),
        3 => primitive.with_tag("landuse", "meadow").with_tag("name", "Green"),
        _ => primitive.with_tag("note", "unclassified"),
    }
}

/// Fixed mixed set used by the non-property tests
pub fn mixed_primitives(count: usize) -> Vec<RawPrimitive> {
    (0..count)
        .map(|i| {
            let refs = [(i * 7) as u8, (i * 3 + 1) as u8, (i * 5 + 2) as u8];
            seeded_primitive(i, (i % 3) as u8, (i % 5) as u8, &refs)
        })
        .collect()
}

pub fn feature_types(features: &[Feature]) -> Vec<String> {
    features.iter().map(|f| f.feature_type.to_string()).collect()
}
