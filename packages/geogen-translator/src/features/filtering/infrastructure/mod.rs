mod complex;
mod dedup;
mod planet;
mod required_tag;
mod skipped_elements;

pub use complex::{ComplexFilter, DEFAULT_COMPLEX_TYPES};
pub use dedup::DedupFilter;
pub use planet::PlanetFilter;
pub use required_tag::RequiredTagFilter;
pub use skipped_elements::{SkippedElementsFilter, SkippedTag};
