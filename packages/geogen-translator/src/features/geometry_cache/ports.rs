//! Geometry Cache Port
//!
//! Read-only lookup from primitive identity to resolved geometry.
//! The cache is built by an earlier pass and shared by `Arc` across all
//! shards. No mutation API is exposed, so lookups need no synchronization.

use crate::shared::models::{Geometry, PrimitiveRef};

/// Geometry cache abstraction (Port in Hexagonal Architecture)
pub trait GeometryCache: Send + Sync {
    /// Resolve a primitive to its geometry
    ///
    /// # Returns
    /// * `Some(geometry)` - Geometry present
    /// * `None` - Not found (dangling reference)
    fn lookup(&self, reference: PrimitiveRef) -> Option<&Geometry>;

    /// Number of cached geometries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
