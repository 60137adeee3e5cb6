//! Feature sink feature module
//!
//! Shared, thread-safe destinations for built features.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{CollectingSink, JsonLinesSink, PartitionedSink};
pub use ports::{EmitError, FeatureSink};
