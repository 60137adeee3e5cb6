//! Bounded sample of failing primitives
//!
//! Keeps the `cap` smallest references seen. "Union, then keep the `cap`
//! smallest" gives the same set for any merge order, unlike "first N seen".

use serde::Serialize;
use std::collections::BTreeSet;

use crate::shared::models::PrimitiveRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureSamples {
    cap: usize,
    refs: BTreeSet<PrimitiveRef>,
}

impl FailureSamples {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            refs: BTreeSet::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn insert(&mut self, reference: PrimitiveRef) {
        self.refs.insert(reference);
        self.truncate();
    }

    pub fn merge(&mut self, other: FailureSamples) {
        self.refs.extend(other.refs);
        self.truncate();
    }

    pub fn contains(&self, reference: &PrimitiveRef) -> bool {
        self.refs.contains(reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrimitiveRef> {
        self.refs.iter()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    fn truncate(&mut self) {
        while self.refs.len() > self.cap {
            self.refs.pop_last();
        }
    }
}
