//! Filtering feature module
//!
//! # Architecture (Hexagonal)
//!
//! ```text
//! Translator
//!     ↓
//! FilterChain (ordered, short-circuit)
//!     ↓
//! ports/ (Filter, StatelessFilter)
//!     ↑
//! infrastructure/ (planet, complex, skipped_elements, dedup, required_tag)
//! ```

pub mod filter_chain;
pub mod infrastructure;
pub mod ports;

pub use filter_chain::FilterChain;
pub use infrastructure::{
    ComplexFilter, DedupFilter, PlanetFilter, RequiredTagFilter, SkippedElementsFilter, SkippedTag,
    DEFAULT_COMPLEX_TYPES,
};
pub use ports::{Filter, StatelessFilter};
