mod accumulator;
mod failure_samples;
mod signature;
mod stats;

pub use accumulator::{Accumulator, AccumulatorSnapshot};
pub use failure_samples::FailureSamples;
pub use signature::TranslatorSignature;
pub use stats::TranslationStats;
