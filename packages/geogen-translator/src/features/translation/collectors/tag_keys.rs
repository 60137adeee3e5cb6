//! Tag key usage counts over accepted primitives

use serde_json::json;
use std::any::Any;
use std::collections::BTreeMap;

use super::{downcast_peer, Collector};
use crate::errors::Result;
use crate::shared::models::{Feature, RawPrimitive};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagKeyCollector {
    counts: BTreeMap<String, u64>,
}

impl TagKeyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

impl Collector for TagKeyCollector {
    fn name(&self) -> &str {
        "tag_keys"
    }

    fn collect(&mut self, primitive: &RawPrimitive, _features: &[Feature]) {
        for key in primitive.tags.keys() {
            *self.counts.entry(key.clone()).or_insert(0) += 1;
        }
    }

    fn clone_for_shard(&self) -> Box<dyn Collector> {
        Box::new(TagKeyCollector::new())
    }

    fn merge(&mut self, other: Box<dyn Collector>) -> Result<()> {
        let other = downcast_peer(self, other)?;
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        Ok(())
    }

    fn report(&self) -> serde_json::Value {
        json!({ "counts": self.counts })
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
