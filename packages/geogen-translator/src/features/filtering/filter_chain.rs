//! Filter chain
//!
//! Ordered sequence of filters. Evaluation stops at the first rejection,
//! so later filters are never invoked for a rejected primitive. Order the
//! cheapest and most selective filters first.

use std::fmt;
use std::sync::Arc;

use super::ports::{Filter, StatelessFilter};
use crate::shared::models::{Feature, RawPrimitive};

#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter owned by this chain
    pub fn append(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Append a boxed filter
    pub fn append_boxed(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a stateless filter shared by every shard copy of this chain
    pub fn append_shared<F: StatelessFilter>(self, filter: F) -> Self {
        self.append(Arc::new(filter))
    }

    /// Accept only if every filter accepts
    pub fn accept(&mut self, primitive: &RawPrimitive) -> bool {
        self.first_rejection(primitive).is_none()
    }

    /// Index of the first filter rejecting `primitive`, if any
    pub fn first_rejection(&mut self, primitive: &RawPrimitive) -> Option<usize> {
        self.filters
            .iter_mut()
            .position(|filter| !filter.accept(primitive))
    }

    /// Accept a built feature only if every filter accepts it
    pub fn accept_feature(&mut self, feature: &Feature) -> bool {
        self.first_feature_rejection(feature).is_none()
    }

    pub fn first_feature_rejection(&mut self, feature: &Feature) -> Option<usize> {
        self.filters
            .iter_mut()
            .position(|filter| !filter.accept_feature(feature))
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.filters.get(index).map(|f| f.name())
    }

    /// Filter names in evaluation order
    pub fn names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name().to_string()).collect()
    }

    /// Filter signatures in evaluation order
    pub fn signatures(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.signature()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Chain for a new shard: each filter supplies its own shard instance
    pub fn clone_for_shard(&self) -> FilterChain {
        FilterChain {
            filters: self.filters.iter().map(|f| f.clone_for_shard()).collect(),
        }
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.names())
            .finish()
    }
}
