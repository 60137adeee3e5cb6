//! Shared module - Common types
//!
//! This module contains types that are shared across all features.
//! It depends only on serde.

pub mod cancellation;
pub mod models;

// Re-exports for convenience
pub use cancellation::CancellationToken;
pub use models::*;
