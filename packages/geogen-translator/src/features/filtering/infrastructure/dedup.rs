//! Seen-id filter
//!
//! Rejects a primitive whose identity was already seen by this shard.
//! The seen set is private to the shard: `clone_for_shard` starts empty.
//! Partitions are disjoint, so per-shard deduplication is enough.

use ahash::AHashSet;

use crate::features::filtering::ports::Filter;
use crate::shared::models::{PrimitiveRef, RawPrimitive};

#[derive(Debug, Default)]
pub struct DedupFilter {
    seen: AHashSet<PrimitiveRef>,
}

impl DedupFilter {
    pub fn new() -> Self {
        Self {
            seen: AHashSet::new(),
        }
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

impl Filter for DedupFilter {
    fn name(&self) -> &str {
        "dedup"
    }

    fn accept(&mut self, primitive: &RawPrimitive) -> bool {
        self.seen.insert(primitive.reference())
    }

    fn clone_for_shard(&self) -> Box<dyn Filter> {
        Box::new(DedupFilter::new())
    }
}
