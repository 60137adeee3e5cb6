//! Translator configuration
//!
//! ```text
//! TranslatorConfig (YAML v1)
//! ├── filters:      Vec<FilterSpec>
//! ├── builder:      BuilderConfig
//! ├── accumulator:  AccumulatorConfig
//! └── orchestrator: OrchestratorConfig
//! ```
//!
//! Every section has defaults, so `version: 1` alone is a valid document.

pub mod error;
pub mod stage_configs;
pub mod translator_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use stage_configs::{
    AccumulatorConfig, BuilderConfig, ClassificationRule, CollectorSpec, FilterSpec,
    OrchestratorConfig, ReductionStrategy,
};
pub use translator_config::{TranslatorConfig, SUPPORTED_VERSIONS};
pub use validation::{Validatable, ValidatableCollection};
