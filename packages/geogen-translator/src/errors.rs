//! Error types for geogen-translator
//!
//! Only configuration-level failures live here. Per-primitive failures
//! (`BuildError`, `EmitError`) are recorded by the translator and never
//! propagate past the primitive that caused them.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::translation::TranslatorSignature;

/// Main error type for translator operations
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// Merge attempted between incompatibly configured translators
    #[error("Configuration mismatch: cannot merge {source_signature} into {target_signature}")]
    ConfigMismatch {
        target_signature: String,
        source_signature: String,
    },

    /// Configuration error (invalid config, unreadable skip list, ...)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should never happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TranslatorError {
    /// Create a configuration mismatch error from two signatures
    pub fn config_mismatch(target: &TranslatorSignature, source: &TranslatorSignature) -> Self {
        TranslatorError::ConfigMismatch {
            target_signature: target.to_string(),
            source_signature: source.to_string(),
        }
    }

    /// Create a configuration mismatch error between two named components
    pub fn component_mismatch(target: impl Into<String>, source: impl Into<String>) -> Self {
        TranslatorError::ConfigMismatch {
            target_signature: target.into(),
            source_signature: source.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        TranslatorError::Serialization(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        TranslatorError::Internal(msg.into())
    }

    /// Get error category for logs
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigMismatch { .. } => "config_mismatch",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for TranslatorError {
    fn from(err: serde_json::Error) -> Self {
        TranslatorError::Serialization(err.to_string())
    }
}

/// Result type alias for translator operations
pub type Result<T> = std::result::Result<T, TranslatorError>;
