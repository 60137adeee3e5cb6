//! In-memory sink collecting every feature behind a mutex

use parking_lot::Mutex;

use super::super::ports::{EmitError, FeatureSink};
use crate::shared::models::Feature;

#[derive(Debug, Default)]
pub struct CollectingSink {
    features: Mutex<Vec<Feature>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self {
            features: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.features.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.lock().is_empty()
    }

    /// Copy of everything emitted so far, in arrival order
    pub fn snapshot(&self) -> Vec<Feature> {
        self.features.lock().clone()
    }

    /// Drain collected features
    pub fn take(&self) -> Vec<Feature> {
        std::mem::take(&mut *self.features.lock())
    }
}

impl FeatureSink for CollectingSink {
    fn emit(&self, feature: Feature) -> Result<(), EmitError> {
        self.features.lock().push(feature);
        Ok(())
    }
}
