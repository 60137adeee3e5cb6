//! Stage-specific configuration types
//!
//! One struct per translation stage: filters, builder, accumulator,
//! orchestrator. Each validates itself through [`Validatable`].

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::features::filtering::DEFAULT_COMPLEX_TYPES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Filters
// ============================================================================

/// One entry of the filter chain, in chain order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Structural sanity of planet data
    Planet,

    /// Only point and area features whose type forms a complex
    Complex {
        #[serde(default = "default_complex_types")]
        types: Vec<String>,
    },

    /// Explicit skip list loaded from a JSON file
    SkippedElements { path: PathBuf },

    /// Drop repeated primitive identities (stateful, per shard)
    Dedup,

    /// Only primitives carrying this tag key
    RequiredTag { key: String },
}

fn default_complex_types() -> Vec<String> {
    DEFAULT_COMPLEX_TYPES.iter().map(|t| t.to_string()).collect()
}

impl Validatable for FilterSpec {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            FilterSpec::Complex { types } if types.is_empty() => {
                Err(ConfigError::invalid("filters.complex.types", "no complex types listed"))
            }
            FilterSpec::Complex { types } if types.iter().any(|t| t.trim().is_empty()) => {
                Err(ConfigError::invalid("filters.complex.types", "empty type"))
            }
            FilterSpec::SkippedElements { path } if path.as_os_str().is_empty() => {
                Err(ConfigError::invalid("filters.skipped_elements.path", "path is empty"))
            }
            FilterSpec::RequiredTag { key } if key.trim().is_empty() => {
                Err(ConfigError::invalid("filters.required_tag.key", "key is empty"))
            }
            _ => Ok(()),
        }
    }

    fn config_name(&self) -> &'static str {
        "FilterSpec"
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Maps a tag to a feature type
///
/// Without `value` any value of `key` matches. Without `feature_type` the
/// type is `"{key}-{value}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationRule {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
}

impl ClassificationRule {
    /// Match any value of `key`
    pub fn any(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            feature_type: None,
        }
    }

    /// Match exactly `key=value` and emit `feature_type`
    pub fn exact(
        key: impl Into<String>,
        value: impl Into<String>,
        feature_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            feature_type: Some(feature_type.into()),
        }
    }
}

/// FeatureMaker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Classification rules, evaluated in order
    pub rules: Vec<ClassificationRule>,

    /// Tag keys that turn a closed line into an area
    pub area_tags: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        let rules = [
            "amenity", "building", "highway", "landuse", "leisure", "natural", "boundary",
            "waterway", "railway",
        ]
        .into_iter()
        .map(ClassificationRule::any)
        .collect();

        let area_tags = ["building", "landuse", "natural", "leisure"]
            .into_iter()
            .map(String::from)
            .collect();

        Self { rules, area_tags }
    }
}

impl BuilderConfig {
    /// Stable content hash, used to tell builders apart in translator
    /// signatures
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let hash = blake3::hash(&bytes);
        hash.to_hex()[..16].to_string()
    }
}

impl Validatable for BuilderConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.key.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("builder.rules[{}].key", i),
                    "key is empty",
                ));
            }
            if matches!(&rule.feature_type, Some(t) if t.trim().is_empty()) {
                return Err(ConfigError::invalid(
                    format!("builder.rules[{}].feature_type", i),
                    "feature type is empty",
                ));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "BuilderConfig"
    }
}

// ============================================================================
// Accumulator
// ============================================================================

/// Auxiliary collector attached to every shard accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectorSpec {
    /// Count accepted primitives per tag key
    TagKeys,

    /// Record identities of accepted primitives carrying `key`
    TaggedIds { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccumulatorConfig {
    /// Failing primitive refs kept per accumulator (0..=100000)
    pub max_failure_samples: usize,

    pub collectors: Vec<CollectorSpec>,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            max_failure_samples: crate::features::translation::DEFAULT_FAILURE_SAMPLE_CAP,
            collectors: Vec::new(),
        }
    }
}

impl Validatable for AccumulatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_failure_samples > 100_000 {
            return Err(ConfigError::range_with_hint(
                "accumulator.max_failure_samples",
                self.max_failure_samples,
                0,
                100_000,
                "Samples are kept in memory on every shard",
            ));
        }

        let mut names: Vec<String> = self
            .collectors
            .iter()
            .map(|c| match c {
                CollectorSpec::TagKeys => "tag_keys".to_string(),
                CollectorSpec::TaggedIds { key } => format!("tagged_ids:{}", key),
            })
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        if names.len() != total {
            return Err(ConfigError::invalid(
                "accumulator.collectors",
                "the same collector is listed twice",
            ));
        }

        for collector in &self.collectors {
            if let CollectorSpec::TaggedIds { key } = collector {
                if key.trim().is_empty() {
                    return Err(ConfigError::invalid(
                        "accumulator.collectors.tagged_ids.key",
                        "key is empty",
                    ));
                }
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AccumulatorConfig"
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Shape of the final merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionStrategy {
    /// Pairwise merges, log2(shards) rounds
    #[default]
    Tree,

    /// Shards folded into the first one, left to right
    Chain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorConfig {
    /// Worker threads (0=auto, 1..=1024)
    pub workers: usize,

    /// Number of shards (0=workers*4, 1..=1000000)
    pub shards: usize,

    pub reduction: ReductionStrategy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            shards: 0,
            reduction: ReductionStrategy::Tree,
        }
    }
}

impl OrchestratorConfig {
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }

    pub fn resolved_shards(&self) -> usize {
        if self.shards == 0 {
            self.resolved_workers() * 4
        } else {
            self.shards
        }
    }
}

impl Validatable for OrchestratorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.workers > 1024 {
            return Err(ConfigError::range_with_hint(
                "orchestrator.workers",
                self.workers,
                0,
                1024,
                "Use 0 to size the pool from the CPU count",
            ));
        }

        if self.shards > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "orchestrator.shards",
                self.shards,
                0,
                1_000_000,
                "Use 0 for four shards per worker",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "OrchestratorConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder_is_valid() {
        let config = BuilderConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.area_tags.contains(&"building".to_string()));
        assert!(!config.area_tags.contains(&"highway".to_string()));
    }

    #[test]
    fn test_fingerprint_is_stable_and_content_based() {
        let a = BuilderConfig::default();
        let mut b = BuilderConfig::default();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 16);

        b.area_tags.push("amenity".to_string());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_empty_rule_key_rejected() {
        let mut config = BuilderConfig::default();
        config.rules.push(ClassificationRule::any(" "));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("builder.rules[9].key"));
    }

    #[test]
    fn test_duplicate_collectors_rejected() {
        let config = AccumulatorConfig {
            max_failure_samples: 8,
            collectors: vec![CollectorSpec::TagKeys, CollectorSpec::TagKeys],
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_orchestrator_range() {
        let config = OrchestratorConfig {
            workers: 5000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Range { .. })));
    }

    #[test]
    fn test_resolved_shards() {
        let config = OrchestratorConfig {
            workers: 3,
            shards: 0,
            reduction: ReductionStrategy::Chain,
        };
        assert_eq!(config.resolved_workers(), 3);
        assert_eq!(config.resolved_shards(), 12);
    }

    #[test]
    fn test_filter_spec_yaml_shape() {
        let specs: Vec<FilterSpec> = serde_yaml::from_str(
            "- kind: planet\n- kind: required_tag\n  key: name\n- kind: skipped_elements\n  path: skip.json\n",
        )
        .unwrap();
        assert_eq!(
            specs,
            vec![
                FilterSpec::Planet,
                FilterSpec::RequiredTag {
                    key: "name".to_string()
                },
                FilterSpec::SkippedElements {
                    path: PathBuf::from("skip.json")
                },
            ]
        );
    }

    #[test]
    fn test_complex_spec_defaults_and_validation() {
        let specs: Vec<FilterSpec> =
            serde_yaml::from_str("- kind: complex\n- kind: complex\n  types: [tourism-zoo]\n").unwrap();
        assert_eq!(
            specs[0],
            FilterSpec::Complex {
                types: default_complex_types()
            }
        );
        assert!(specs[1].validate().is_ok());

        let empty = FilterSpec::Complex { types: vec![] };
        assert!(empty.validate().unwrap_err().to_string().contains("filters.complex.types"));
        let blank = FilterSpec::Complex {
            types: vec![" ".to_string()],
        };
        assert!(blank.validate().is_err());
    }
}
