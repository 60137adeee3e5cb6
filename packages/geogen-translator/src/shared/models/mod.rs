//! Shared models

mod feature;
mod geometry;
mod primitive;

pub use feature::{Feature, FeatureType};
pub use geometry::{is_ring, Coord, Geometry, Ring};
pub use primitive::{PrimitiveKind, PrimitiveRef, RawPrimitive, Tags};
