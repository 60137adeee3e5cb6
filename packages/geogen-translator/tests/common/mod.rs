//! Common test utilities for geogen-translator
//!
//! Shared fixtures (geometry cache, primitive sets, translator templates)
//! and assertions for the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
