/*
 * Geogen Translator - Feature Translation Stage
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (RawPrimitive, Geometry, Feature)
 * - features/    : Vertical slices (geometry_cache → filtering → feature_building → translation → sink)
 * - pipeline/    : Shard orchestration (scatter clones, gather via fold)
 * - config/      : Versioned YAML configuration
 *
 * Performance:
 * - Read-only geometry cache shared by Arc, no locking on lookups
 * - Per-shard accumulators, lock-free hot path
 * - Rayon work-stealing across shards
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules (cache, filters, builder, translator, sinks)
pub mod features;

/// Shard orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, TranslatorConfig};
pub use errors::{Result, TranslatorError};
pub use features::feature_building::{BuildError, FeatureBuilder, FeatureMaker};
pub use features::filtering::{Filter, FilterChain, StatelessFilter};
pub use features::geometry_cache::{GeometryCache, InMemoryGeometryCache};
pub use features::sink::{CollectingSink, EmitError, FeatureSink};
pub use features::translation::{Accumulator, Translator, TranslatorSignature};
pub use pipeline::{CancellationToken, ShardOrchestrator, TranslationRun};
pub use shared::models::{Coord, Feature, FeatureType, Geometry, PrimitiveKind, PrimitiveRef, RawPrimitive};
