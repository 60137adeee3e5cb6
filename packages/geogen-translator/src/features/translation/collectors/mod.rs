//! Auxiliary collectors
//!
//! A collector observes every primitive that was accepted and built,
//! together with the features that passed the feature-level filters, and
//! keeps private per-shard records.
//! Collectors are forked empty for each shard and merged afterwards; the
//! merge must be associative and commutative.

mod tag_keys;
mod tagged_ids;

pub use tag_keys::TagKeyCollector;
pub use tagged_ids::TaggedIdCollector;

use std::any::Any;

use crate::errors::{Result, TranslatorError};
use crate::shared::models::{Feature, RawPrimitive};

pub trait Collector: Send + Sync + 'static {
    /// Stable name, part of the translator signature
    fn name(&self) -> &str;

    fn collect(&mut self, primitive: &RawPrimitive, features: &[Feature]);

    /// Empty instance with the same configuration
    fn clone_for_shard(&self) -> Box<dyn Collector>;

    /// Fold another shard's records into this one
    fn merge(&mut self, other: Box<dyn Collector>) -> Result<()>;

    /// Serializable view of the collected records
    fn report(&self) -> serde_json::Value;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Recover the concrete collector behind `other`, or fail with a
/// configuration mismatch when the two collectors differ.
pub(crate) fn downcast_peer<T: Collector>(target: &T, other: Box<dyn Collector>) -> Result<Box<T>> {
    if target.name() != other.name() {
        return Err(TranslatorError::component_mismatch(target.name(), other.name()));
    }
    let other_name = other.name().to_string();
    other
        .into_any()
        .downcast::<T>()
        .map_err(|_| TranslatorError::component_mismatch(target.name(), other_name))
}
