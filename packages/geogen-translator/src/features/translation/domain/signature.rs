//! Translator signature
//!
//! Everything that must agree for two translators' accumulators to be
//! combinable: filter set and order, builder configuration, collector set
//! and the failure sample cap.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TranslatorSignature {
    pub filters: Vec<String>,
    pub builder: String,
    pub collectors: Vec<String>,
    pub failure_sample_cap: usize,
}

impl fmt::Display for TranslatorSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[filters={} builder={} collectors={} samples={}]",
            self.filters.join(","),
            self.builder,
            self.collectors.join(","),
            self.failure_sample_cap
        )
    }
}
