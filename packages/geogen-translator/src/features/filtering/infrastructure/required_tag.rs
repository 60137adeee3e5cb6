//! Required-tag filter: accepts only primitives carrying a tag key

use crate::features::filtering::ports::StatelessFilter;
use crate::shared::models::RawPrimitive;

#[derive(Debug, Clone)]
pub struct RequiredTagFilter {
    key: String,
    name: String,
}

impl RequiredTagFilter {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            name: format!("required_tag:{}", key),
            key,
        }
    }
}

impl StatelessFilter for RequiredTagFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept(&self, primitive: &RawPrimitive) -> bool {
        primitive.tags.contains_key(&self.key)
    }
}
