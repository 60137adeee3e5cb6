//! Feature modules
//!
//! Vertical slices of the translation stage:
//! geometry_cache → filtering → feature_building → translation → sink

pub mod feature_building;
pub mod filtering;
pub mod geometry_cache;
pub mod sink;
pub mod translation;
