//! Translation feature module
//!
//! The Translator: per-primitive processing, shard cloning and the merge
//! algebra over per-shard accumulators.
//!
//! # Usage
//!
//! ```ignore
//! let template = Translator::new(filters, builder, cache, sink);
//! let mut a = template.clone_for_shard();
//! let mut b = template.clone_for_shard();
//! a.translate_all(&left, &cancel);
//! b.translate_all(&right, &cancel);
//! a.merge(b)?;
//! ```

pub mod collectors;
pub mod domain;
pub mod translator;

pub use collectors::{Collector, TagKeyCollector, TaggedIdCollector};
pub use domain::{
    Accumulator, AccumulatorSnapshot, FailureSamples, TranslationStats, TranslatorSignature,
};
pub use translator::{ShardReport, TranslateOutcome, Translator, DEFAULT_FAILURE_SAMPLE_CAP};
