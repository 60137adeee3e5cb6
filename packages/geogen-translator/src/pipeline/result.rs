//! Run result

use serde::Serialize;
use std::time::Duration;

use crate::config::ReductionStrategy;
use crate::features::translation::{AccumulatorSnapshot, Translator};

/// What the orchestrator did, independent of the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    pub shards: usize,
    pub workers: usize,
    pub reduction: ReductionStrategy,

    /// Primitives handed to a translator (less than the input when cancelled)
    pub processed: u64,

    pub cancelled: bool,

    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(duration.as_millis() as u64)
}

/// Merged translator plus run metadata
#[derive(Debug)]
pub struct TranslationRun {
    pub translator: Translator,
    pub metadata: RunMetadata,
}

/// Serializable summary written next to the features
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub signature: String,
    pub metadata: RunMetadata,
    pub accumulator: AccumulatorSnapshot,
}

impl TranslationRun {
    pub fn snapshot(&self) -> AccumulatorSnapshot {
        self.translator.snapshot()
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            signature: self.translator.signature().to_string(),
            metadata: self.metadata.clone(),
            accumulator: self.translator.snapshot(),
        }
    }
}
