//! In-memory geometry cache
//!
//! ## Design
//!
//! ```text
//! InMemoryGeometryCacheBuilder  (mutable, single owner)
//!           │ build()
//!           ▼
//! Arc<InMemoryGeometryCache>    (frozen, shared by every shard)
//! ```
//!
//! The builder is the only way to insert; once built the cache is
//! immutable for its whole lifetime.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use super::super::ports::GeometryCache;
use crate::errors::Result;
use crate::shared::models::{Geometry, PrimitiveRef};

/// Frozen in-memory cache
#[derive(Debug, Default)]
pub struct InMemoryGeometryCache {
    geometries: AHashMap<PrimitiveRef, Geometry>,
}

/// One cache entry in the JSON dump format
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    #[serde(flatten)]
    reference: PrimitiveRef,
    geometry: Geometry,
}

impl InMemoryGeometryCache {
    pub fn builder() -> InMemoryGeometryCacheBuilder {
        InMemoryGeometryCacheBuilder::default()
    }

    /// Load a cache from a JSON array of `{kind, id, geometry}` entries
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Arc<Self>> {
        let entries: Vec<CacheEntry> = serde_json::from_str(content)?;
        let mut builder = Self::builder();
        for entry in entries {
            builder.insert(entry.reference, entry.geometry);
        }
        let cache = builder.build();
        tracing::info!("Loaded geometry cache with {} entries", cache.len());
        Ok(cache)
    }

    pub fn contains(&self, reference: PrimitiveRef) -> bool {
        self.geometries.contains_key(&reference)
    }
}

impl GeometryCache for InMemoryGeometryCache {
    fn lookup(&self, reference: PrimitiveRef) -> Option<&Geometry> {
        self.geometries.get(&reference)
    }

    fn len(&self) -> usize {
        self.geometries.len()
    }
}

/// Mutable builder for [`InMemoryGeometryCache`]
#[derive(Debug, Default)]
pub struct InMemoryGeometryCacheBuilder {
    geometries: AHashMap<PrimitiveRef, Geometry>,
}

impl InMemoryGeometryCacheBuilder {
    /// Insert (or replace) a geometry
    pub fn insert(&mut self, reference: PrimitiveRef, geometry: Geometry) -> &mut Self {
        self.geometries.insert(reference, geometry);
        self
    }

    pub fn with(mut self, reference: PrimitiveRef, geometry: Geometry) -> Self {
        self.insert(reference, geometry);
        self
    }

    /// Freeze into a shareable cache
    pub fn build(self) -> Arc<InMemoryGeometryCache> {
        Arc::new(InMemoryGeometryCache {
            geometries: self.geometries,
        })
    }
}
