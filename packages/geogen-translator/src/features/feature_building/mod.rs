//! Feature building feature module
//!
//! Builds output features from accepted primitives against the geometry
//! cache. Builders are shared read-only by every shard.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::FeatureMaker;
pub use ports::{BuildError, FeatureBuilder};
