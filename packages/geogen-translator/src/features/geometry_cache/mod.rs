//! Geometry cache feature
//!
//! Precomputed, read-only index from primitive identity to geometry.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{InMemoryGeometryCache, InMemoryGeometryCacheBuilder};
pub use ports::GeometryCache;
