//! Feature Sink Port
//!
//! Thread-safe consumer of completed features. Every shard emits into the
//! same sink concurrently; implementations own their synchronization.
//! Ordering across shards is sink-defined.

use thiserror::Error;

use crate::shared::models::Feature;

/// Emit failure. Recorded by the translator, never fatal to a shard.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Sink refused the feature
    #[error("Sink rejected feature: {0}")]
    Rejected(String),

    /// Underlying writer failed
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Feature could not be encoded
    #[error("Sink serialization error: {0}")]
    Serialization(String),
}

impl EmitError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Feature sink abstraction (Port in Hexagonal Architecture)
pub trait FeatureSink: Send + Sync {
    /// Take ownership of one feature. Safe to call from many threads.
    fn emit(&self, feature: Feature) -> Result<(), EmitError>;

    /// Flush buffered output
    fn flush(&self) -> Result<(), EmitError> {
        Ok(())
    }
}
