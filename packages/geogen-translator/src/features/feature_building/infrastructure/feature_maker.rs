//! Feature Maker - reference feature builder
//!
//! ## Geometry
//!
//! | Primitive | Children      | Result                                     |
//! |-----------|---------------|--------------------------------------------|
//! | point     | itself        | `Point`                                    |
//! | line      | points        | `Line`, or `Area` when closed + area-tagged |
//! | relation  | lines         | `Area` from closed members, `MultiLine` for open boundaries |
//!
//! ## Classification
//!
//! Every matching rule yields one feature type, so a primitive can become
//! several features (multi-typed relation) or none at all.

use std::collections::BTreeMap;

use crate::config::{BuilderConfig, ClassificationRule};
use crate::features::feature_building::ports::{BuildError, FeatureBuilder};
use crate::features::geometry_cache::GeometryCache;
use crate::shared::models::{
    is_ring, Coord, Feature, FeatureType, Geometry, PrimitiveKind, RawPrimitive,
};

#[derive(Debug, Clone)]
pub struct FeatureMaker {
    config: BuilderConfig,
    signature: String,
}

impl FeatureMaker {
    pub fn new(config: BuilderConfig) -> Self {
        let signature = format!("feature_maker:{}", config.fingerprint());
        Self { config, signature }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Feature types for a primitive, in rule order, without duplicates
    pub fn classify(&self, primitive: &RawPrimitive) -> Vec<FeatureType> {
        let mut types: Vec<FeatureType> = Vec::new();
        for rule in &self.config.rules {
            if let Some(feature_type) = rule_type(rule, primitive) {
                if !types.contains(&feature_type) {
                    types.push(feature_type);
                }
            }
        }
        types
    }

    fn resolve_geometry(
        &self,
        primitive: &RawPrimitive,
        cache: &dyn GeometryCache,
    ) -> Result<Geometry, BuildError> {
        let this = primitive.reference();
        match primitive.kind {
            PrimitiveKind::Point => match cache.lookup(this) {
                Some(Geometry::Point(coord)) => Ok(Geometry::Point(*coord)),
                Some(other) => Err(BuildError::malformed(
                    this,
                    format!("expected point geometry, found {}", other.kind_name()),
                )),
                None => Err(BuildError::dangling(this, this)),
            },
            PrimitiveKind::Line => {
                let coords = self.resolve_points(primitive, cache)?;
                if coords.len() < 2 {
                    return Err(BuildError::malformed(this, "line needs at least 2 points"));
                }
                if primitive.is_closed_line() && self.is_area(primitive) {
                    Ok(Geometry::Area(vec![coords]))
                } else {
                    Ok(Geometry::Line(coords))
                }
            }
            PrimitiveKind::Relation => self.assemble_relation(primitive, cache),
        }
    }

    fn resolve_points(
        &self,
        primitive: &RawPrimitive,
        cache: &dyn GeometryCache,
    ) -> Result<Vec<Coord>, BuildError> {
        let this = primitive.reference();
        primitive
            .child_refs()
            .map(|child| match cache.lookup(child) {
                Some(Geometry::Point(coord)) => Ok(*coord),
                Some(other) => Err(BuildError::malformed(
                    this,
                    format!("{} resolved to {}, expected point", child, other.kind_name()),
                )),
                None => Err(BuildError::dangling(this, child)),
            })
            .collect()
    }

    fn assemble_relation(
        &self,
        primitive: &RawPrimitive,
        cache: &dyn GeometryCache,
    ) -> Result<Geometry, BuildError> {
        let this = primitive.reference();
        let mut members: Vec<Vec<Coord>> = Vec::with_capacity(primitive.refs.len());

        for child in primitive.child_refs() {
            match cache.lookup(child) {
                Some(Geometry::Line(coords)) => members.push(coords.clone()),
                Some(Geometry::Area(rings)) => members.extend(rings.iter().cloned()),
                Some(other) => {
                    return Err(BuildError::malformed(
                        this,
                        format!("member {} resolved to {}", child, other.kind_name()),
                    ))
                }
                None => return Err(BuildError::dangling(this, child)),
            }
        }

        if members.is_empty() {
            return Err(BuildError::malformed(this, "relation has no members"));
        }

        if members.iter().all(|m| is_ring(m)) {
            return Ok(Geometry::Area(members));
        }

        if primitive.has_tag("type", "boundary") {
            // Unassembled boundary: keep member lines as-is
            return Ok(Geometry::MultiLine(members));
        }

        Err(BuildError::malformed(this, "multipolygon has unclosed members"))
    }

    fn is_area(&self, primitive: &RawPrimitive) -> bool {
        if primitive.has_tag("area", "no") {
            return false;
        }
        primitive.has_tag("area", "yes")
            || self
                .config
                .area_tags
                .iter()
                .any(|key| primitive.tags.contains_key(key))
    }
}

impl FeatureBuilder for FeatureMaker {
    fn name(&self) -> &str {
        "feature_maker"
    }

    fn signature(&self) -> String {
        self.signature.clone()
    }

    fn build(
        &self,
        primitive: &RawPrimitive,
        cache: &dyn GeometryCache,
    ) -> Result<Vec<Feature>, BuildError> {
        let geometry = self.resolve_geometry(primitive, cache)?;
        let types = self.classify(primitive);
        if types.is_empty() {
            return Ok(Vec::new());
        }

        let attributes = normalize_attributes(primitive);
        let source = primitive.reference();
        Ok(types
            .into_iter()
            .map(|feature_type| {
                Feature::new(source, feature_type, geometry.clone()).with_attributes(attributes.clone())
            })
            .collect())
    }
}

fn rule_type(rule: &ClassificationRule, primitive: &RawPrimitive) -> Option<FeatureType> {
    let actual = primitive.tag(&rule.key)?;
    if let Some(expected) = &rule.value {
        if expected != actual {
            return None;
        }
    }
    if actual.eq_ignore_ascii_case("no") {
        return None;
    }
    Some(match &rule.feature_type {
        Some(name) => FeatureType::new(name.clone()),
        None => FeatureType::new(format!("{}-{}", rule.key, actual)),
    })
}

/// Lower-cased keys, trimmed values, empty values and structural tags dropped
fn normalize_attributes(primitive: &RawPrimitive) -> BTreeMap<String, String> {
    primitive
        .tags
        .iter()
        .filter_map(|(key, value)| {
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            if key.is_empty() || value.is_empty() || key == "area" {
                return None;
            }
            if key == "type" && primitive.kind == PrimitiveKind::Relation {
                return None;
            }
            Some((key, value.to_string()))
        })
        .collect()
}
