//! Planet filter
//!
//! Baseline acceptance for a planet extract: drops untagged primitives,
//! degenerate lines and relations that do not describe an area.

use crate::features::filtering::ports::StatelessFilter;
use crate::shared::models::{Feature, PrimitiveKind, RawPrimitive};

/// Relation `type` values describing areas
const AREA_RELATION_TYPES: &[&str] = &["multipolygon", "boundary"];

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanetFilter;

impl PlanetFilter {
    pub fn new() -> Self {
        Self
    }
}

impl StatelessFilter for PlanetFilter {
    fn name(&self) -> &str {
        "planet"
    }

    fn accept(&self, primitive: &RawPrimitive) -> bool {
        if primitive.tags.is_empty() {
            return false;
        }

        match primitive.kind {
            PrimitiveKind::Point => true,
            PrimitiveKind::Line => primitive.refs.len() >= 2,
            PrimitiveKind::Relation => {
                !primitive.refs.is_empty()
                    && primitive
                        .tag("type")
                        .is_some_and(|t| AREA_RELATION_TYPES.contains(&t))
            }
        }
    }

    fn accept_feature(&self, feature: &Feature) -> bool {
        !feature.geometry.is_empty()
    }
}
