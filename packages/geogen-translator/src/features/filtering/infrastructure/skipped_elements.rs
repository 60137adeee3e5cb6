//! Skip-list filter
//!
//! Rejects primitives listed in a static JSON file loaded once at
//! construction:
//!
//! ```json
//! {
//!   "points": [1, 2],
//!   "lines": [10],
//!   "relations": [],
//!   "tags": [{"key": "disused", "value": "yes"}, {"key": "demolished"}]
//! }
//! ```
//!
//! A tag rule without `value` matches any value of `key`.

use ahash::AHashSet;
use serde::Deserialize;
use std::path::Path;

use crate::config::{ConfigError, ConfigResult};
use crate::features::filtering::ports::StatelessFilter;
use crate::shared::models::{PrimitiveRef, RawPrimitive};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct SkipListFile {
    #[serde(default)]
    points: Vec<i64>,
    #[serde(default)]
    lines: Vec<i64>,
    #[serde(default)]
    relations: Vec<i64>,
    #[serde(default)]
    tags: Vec<SkippedTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkippedTag {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl SkippedTag {
    fn matches(&self, primitive: &RawPrimitive) -> bool {
        match (&self.value, primitive.tag(&self.key)) {
            (Some(expected), Some(actual)) => expected == actual,
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct SkippedElementsFilter {
    ids: AHashSet<PrimitiveRef>,
    tags: Vec<SkippedTag>,
}

impl SkippedElementsFilter {
    /// Load the skip list. A missing or malformed file is a construction
    /// error and aborts the run.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let filter = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded skip list {}: {} ids, {} tag rules",
            path.display(),
            filter.ids.len(),
            filter.tags.len()
        );
        Ok(filter)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let file: SkipListFile = serde_json::from_str(content)
            .map_err(|e| ConfigError::Custom(format!("Invalid skip list: {}", e)))?;

        let ids = file
            .points
            .into_iter()
            .map(PrimitiveRef::point)
            .chain(file.lines.into_iter().map(PrimitiveRef::line))
            .chain(file.relations.into_iter().map(PrimitiveRef::relation))
            .collect();

        Ok(Self {
            ids,
            tags: file.tags,
        })
    }

    pub fn from_parts(ids: impl IntoIterator<Item = PrimitiveRef>, tags: Vec<SkippedTag>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            tags,
        }
    }

    pub fn is_skipped(&self, primitive: &RawPrimitive) -> bool {
        self.ids.contains(&primitive.reference()) || self.tags.iter().any(|t| t.matches(primitive))
    }

    /// Content hash of the skip list, independent of listing order
    pub fn fingerprint(&self) -> String {
        let mut ids: Vec<String> = self.ids.iter().map(|r| r.to_string()).collect();
        ids.sort_unstable();
        let mut tags: Vec<String> = self
            .tags
            .iter()
            .map(|t| match &t.value {
                Some(value) => format!("{}={}", t.key, value),
                None => t.key.clone(),
            })
            .collect();
        tags.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        hasher.update(ids.join(",").as_bytes());
        hasher.update(b"|");
        hasher.update(tags.join(",").as_bytes());
        hasher.finalize().to_hex()[..16].to_string()
    }
}

impl StatelessFilter for SkippedElementsFilter {
    fn name(&self) -> &str {
        "skipped_elements"
    }

    fn signature(&self) -> String {
        format!("skipped_elements:{}", self.fingerprint())
    }

    fn accept(&self, primitive: &RawPrimitive) -> bool {
        !self.is_skipped(primitive)
    }
}
