//! Complex filter
//!
//! Keeps only features that can take part in a complex: point or area
//! geometry whose type belongs to a configured set. An entry without a
//! dash (`leisure`) matches every type of that key (`leisure-park`), an
//! entry with one (`tourism-zoo`) matches exactly.

use crate::features::filtering::ports::StatelessFilter;
use crate::shared::models::{Feature, Geometry, RawPrimitive};

/// Types forming complexes when none are configured
pub const DEFAULT_COMPLEX_TYPES: &[&str] = &[
    "amenity",
    "boundary",
    "building",
    "historic",
    "landuse",
    "leisure",
    "tourism",
];

#[derive(Debug, Clone)]
pub struct ComplexFilter {
    types: Vec<String>,
}

impl ComplexFilter {
    pub fn new(types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut types: Vec<String> = types.into_iter().map(Into::into).collect();
        types.sort_unstable();
        types.dedup();
        Self { types }
    }

    pub fn is_complex_type(&self, feature_type: &str) -> bool {
        let key = feature_type.split('-').next().unwrap_or(feature_type);
        self.types
            .iter()
            .any(|t| t == feature_type || (!t.contains('-') && t == key))
    }
}

impl Default for ComplexFilter {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLEX_TYPES.iter().copied())
    }
}

impl StatelessFilter for ComplexFilter {
    fn name(&self) -> &str {
        "complex"
    }

    fn signature(&self) -> String {
        format!("complex:{}", self.types.join("+"))
    }

    fn accept(&self, _primitive: &RawPrimitive) -> bool {
        true
    }

    fn accept_feature(&self, feature: &Feature) -> bool {
        matches!(feature.geometry, Geometry::Point(_) | Geometry::Area(_))
            && self.is_complex_type(feature.feature_type.as_str())
    }
}
