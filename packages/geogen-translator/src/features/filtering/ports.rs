//! Filter Port
//!
//! Acceptance predicates over raw primitives (and, second stage, over the
//! features built from them).
//!
//! Two kinds of filter exist:
//! - **Stateful** filters implement [`Filter`] directly. `&mut self` lets
//!   them keep private per-shard state (e.g. a seen-id cache) and
//!   `clone_for_shard` must return an instance with empty state.
//! - **Stateless** filters implement [`StatelessFilter`] and are held as
//!   `Arc<F>`. A shard copy is an `Arc` clone, so one instance (e.g. a
//!   skip list loaded from disk) is shared read-only by every shard.

use std::sync::Arc;

use crate::shared::models::{Feature, RawPrimitive};

/// Acceptance predicate owned exclusively by one translator
pub trait Filter: Send + Sync {
    /// Stable name, used in rejection counts
    fn name(&self) -> &str;

    /// Name plus any configuration that changes acceptance. Translators
    /// merge only when every filter signature matches.
    fn signature(&self) -> String {
        self.name().to_string()
    }

    /// Accept or reject a raw primitive. Must not touch shared state.
    fn accept(&mut self, primitive: &RawPrimitive) -> bool;

    /// Accept or reject a built feature
    fn accept_feature(&mut self, _feature: &Feature) -> bool {
        true
    }

    /// Instance for a new shard
    fn clone_for_shard(&self) -> Box<dyn Filter>;
}

/// Pure predicate that is safe to share between shards
pub trait StatelessFilter: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn signature(&self) -> String {
        self.name().to_string()
    }

    fn accept(&self, primitive: &RawPrimitive) -> bool;

    fn accept_feature(&self, _feature: &Feature) -> bool {
        true
    }
}

impl<F: StatelessFilter> Filter for Arc<F> {
    fn name(&self) -> &str {
        StatelessFilter::name(self.as_ref())
    }

    fn signature(&self) -> String {
        StatelessFilter::signature(self.as_ref())
    }

    fn accept(&mut self, primitive: &RawPrimitive) -> bool {
        StatelessFilter::accept(self.as_ref(), primitive)
    }

    fn accept_feature(&mut self, feature: &Feature) -> bool {
        StatelessFilter::accept_feature(self.as_ref(), feature)
    }

    fn clone_for_shard(&self) -> Box<dyn Filter> {
        Box::new(Arc::clone(self))
    }
}
