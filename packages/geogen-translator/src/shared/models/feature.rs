//! Output feature record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::geometry::Geometry;
use super::primitive::PrimitiveRef;

/// Feature-type classification (e.g. `amenity-cafe`, `highway-primary`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureType(pub String);

impl FeatureType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized output feature. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub source: PrimitiveRef,
    pub feature_type: FeatureType,
    pub geometry: Geometry,
    pub attributes: BTreeMap<String, String>,
}

impl Feature {
    pub fn new(source: PrimitiveRef, feature_type: FeatureType, geometry: Geometry) -> Self {
        Self {
            source,
            feature_type,
            geometry,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }
}
