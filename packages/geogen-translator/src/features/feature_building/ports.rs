//! Feature Builder Port
//!
//! Turns one accepted primitive into zero or more features, resolving
//! child geometry through the read-only cache. A failure concerns that
//! primitive alone.

use thiserror::Error;

use crate::features::geometry_cache::GeometryCache;
use crate::shared::models::{Feature, PrimitiveRef, RawPrimitive};

/// Per-primitive build failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A referenced child is absent from the geometry cache
    #[error("Dangling reference from {primitive}: {missing} is not in the geometry cache")]
    DanglingReference {
        primitive: PrimitiveRef,
        missing: PrimitiveRef,
    },

    /// Geometry resolved but cannot form a valid shape
    #[error("Malformed geometry for {primitive}: {reason}")]
    MalformedGeometry {
        primitive: PrimitiveRef,
        reason: String,
    },
}

impl BuildError {
    pub fn dangling(primitive: PrimitiveRef, missing: PrimitiveRef) -> Self {
        Self::DanglingReference { primitive, missing }
    }

    pub fn malformed(primitive: PrimitiveRef, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            primitive,
            reason: reason.into(),
        }
    }

    /// Primitive the failure belongs to
    pub fn primitive(&self) -> PrimitiveRef {
        match self {
            Self::DanglingReference { primitive, .. } | Self::MalformedGeometry { primitive, .. } => {
                *primitive
            }
        }
    }

    /// Get error category for stats
    pub fn category(&self) -> &'static str {
        match self {
            Self::DanglingReference { .. } => "dangling_reference",
            Self::MalformedGeometry { .. } => "malformed_geometry",
        }
    }
}

/// Feature builder abstraction (Port in Hexagonal Architecture)
pub trait FeatureBuilder: Send + Sync {
    /// Builder name for logs
    fn name(&self) -> &str;

    /// Configuration fingerprint. Translators merge only when equal.
    fn signature(&self) -> String {
        self.name().to_string()
    }

    /// Build features for an accepted primitive
    ///
    /// # Returns
    /// * `Ok(features)` - Zero, one or several features
    /// * `Err(BuildError)` - Dangling reference or malformed shape
    fn build(
        &self,
        primitive: &RawPrimitive,
        cache: &dyn GeometryCache,
    ) -> Result<Vec<Feature>, BuildError>;
}
