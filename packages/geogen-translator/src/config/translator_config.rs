//! Top-level translator configuration
//!
//! YAML schema v1:
//!
//! ```yaml
//! version: 1
//! filters:
//!   - kind: planet
//!   - kind: skipped_elements
//!     path: skipped.json
//! builder:
//!   rules:
//!     - key: amenity
//!     - key: highway
//!       value: motorway
//!       feature_type: road-major
//!   area_tags: [building, landuse]
//! accumulator:
//!   max_failure_samples: 64
//!   collectors:
//!     - kind: tag_keys
//! orchestrator:
//!   workers: 0
//!   shards: 0
//!   reduction: tree
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::stage_configs::{
    AccumulatorConfig, BuilderConfig, CollectorSpec, FilterSpec, OrchestratorConfig,
};
use super::validation::{Validatable, ValidatableCollection};
use crate::features::feature_building::FeatureMaker;
use crate::features::filtering::{
    ComplexFilter, DedupFilter, FilterChain, PlanetFilter, RequiredTagFilter, SkippedElementsFilter,
};
use crate::features::geometry_cache::GeometryCache;
use crate::features::sink::FeatureSink;
use crate::features::translation::{Collector, TagKeyCollector, TaggedIdCollector, Translator};

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u64] = &[1];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslatorConfig {
    /// Schema version (always 1 for v1)
    pub version: u64,

    /// Filter chain, in evaluation order
    #[serde(default)]
    pub filters: Vec<FilterSpec>,

    #[serde(default)]
    pub builder: BuilderConfig,

    #[serde(default)]
    pub accumulator: AccumulatorConfig,

    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            filters: vec![FilterSpec::Planet],
            builder: BuilderConfig::default(),
            accumulator: AccumulatorConfig::default(),
            orchestrator: OrchestratorConfig::default(),
        }
    }
}

impl TranslatorConfig {
    /// Load from YAML file
    ///
    /// Relative skip-list paths are resolved against the directory of the
    /// configuration file.
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;

        if let Some(base) = path.parent() {
            for filter in &mut config.filters {
                if let FilterSpec::SkippedElements { path } = filter {
                    if path.is_relative() {
                        *path = base.join(&*path);
                    }
                }
            }
        }

        tracing::info!(
            "Loaded translator config from {} ({} filters, {} rules)",
            path.display(),
            config.filters.len(),
            config.builder.rules.len()
        );
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        let version = match raw.get("version") {
            None => return Err(ConfigError::MissingVersion),
            Some(v) => v.as_u64().ok_or_else(|| {
                ConfigError::invalid("version", "version must be a positive integer")
            })?,
        };

        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config: TranslatorConfig = serde_yaml::from_value(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Export to YAML string
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::Yaml)
    }

    /// Assemble the template translator described by this configuration
    ///
    /// Loads skip lists from disk; the cache and sink are supplied by the
    /// caller and shared by every shard.
    pub fn build_translator(
        &self,
        cache: Arc<dyn GeometryCache>,
        sink: Arc<dyn FeatureSink>,
    ) -> crate::Result<Translator> {
        self.validate()?;

        let mut filters = FilterChain::new();
        for spec in &self.filters {
            filters = match spec {
                FilterSpec::Planet => filters.append_shared(PlanetFilter::new()),
                FilterSpec::Complex { types } => {
                    filters.append_shared(ComplexFilter::new(types.iter().cloned()))
                }
                FilterSpec::SkippedElements { path } => {
                    filters.append_shared(SkippedElementsFilter::from_file(path)?)
                }
                FilterSpec::Dedup => filters.append(DedupFilter::new()),
                FilterSpec::RequiredTag { key } => {
                    filters.append_shared(RequiredTagFilter::new(key.clone()))
                }
            };
        }

        let collectors: Vec<Box<dyn Collector>> = self
            .accumulator
            .collectors
            .iter()
            .map(|spec| -> Box<dyn Collector> {
                match spec {
                    CollectorSpec::TagKeys => Box::new(TagKeyCollector::new()),
                    CollectorSpec::TaggedIds { key } => Box::new(TaggedIdCollector::new(key.clone())),
                }
            })
            .collect();

        let builder = Arc::new(FeatureMaker::new(self.builder.clone()));
        let translator = Translator::new(filters, builder, cache, sink)
            .with_failure_sample_cap(self.accumulator.max_failure_samples)
            .with_collectors(collectors);

        tracing::debug!("Built template translator {}", translator.signature());
        Ok(translator)
    }
}

impl Validatable for TranslatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }
        self.filters.validate_all()?;
        self.builder.validate()?;
        self.accumulator.validate()?;
        self.orchestrator.validate()
    }

    fn config_name(&self) -> &'static str {
        "TranslatorConfig"
    }
}
