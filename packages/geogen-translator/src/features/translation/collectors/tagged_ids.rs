//! Identities of accepted primitives carrying a given tag key
//! (e.g. every `boundary` relation, for a later boundary pass)

use serde_json::json;
use std::any::Any;
use std::collections::BTreeSet;

use super::{downcast_peer, Collector};
use crate::errors::Result;
use crate::shared::models::{Feature, PrimitiveRef, RawPrimitive};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedIdCollector {
    key: String,
    name: String,
    ids: BTreeSet<PrimitiveRef>,
}

impl TaggedIdCollector {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            name: format!("tagged_ids:{}", key),
            key,
            ids: BTreeSet::new(),
        }
    }

    pub fn ids(&self) -> &BTreeSet<PrimitiveRef> {
        &self.ids
    }
}

impl Collector for TaggedIdCollector {
    fn name(&self) -> &str {
        &self.name
    }

    fn collect(&mut self, primitive: &RawPrimitive, _features: &[Feature]) {
        if primitive.tags.contains_key(&self.key) {
            self.ids.insert(primitive.reference());
        }
    }

    fn clone_for_shard(&self) -> Box<dyn Collector> {
        Box::new(TaggedIdCollector::new(self.key.clone()))
    }

    fn merge(&mut self, other: Box<dyn Collector>) -> Result<()> {
        let other = downcast_peer(self, other)?;
        self.ids.extend(other.ids);
        Ok(())
    }

    fn report(&self) -> serde_json::Value {
        let ids: Vec<String> = self.ids.iter().map(ToString::to_string).collect();
        json!({ "key": self.key, "count": self.ids.len(), "ids": ids })
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_union() {
        let boundary = |id| {
            RawPrimitive::relation(id, vec![1])
                .with_tag("type", "boundary")
                .with_tag("boundary", "administrative")
        };

        let mut a = TaggedIdCollector::new("boundary");
        a.collect(&boundary(1), &[]);
        a.collect(&boundary(2), &[]);
        a.collect(&RawPrimitive::point(3).with_tag("amenity", "cafe"), &[]);

        let mut b = TaggedIdCollector::new("boundary");
        b.collect(&boundary(2), &[]);
        b.collect(&boundary(5), &[]);

        a.merge(Box::new(b)).unwrap();
        let ids: Vec<_> = a.ids().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);
        assert_eq!(a.report()["count"], 3);
    }

    #[test]
    fn test_different_key_is_mismatch() {
        let mut a = TaggedIdCollector::new("boundary");
        let err = a.merge(Box::new(TaggedIdCollector::new("place"))).unwrap_err();
        assert_eq!(err.category(), "config_mismatch");
    }
}
