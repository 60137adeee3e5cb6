mod collecting;
mod json_lines;
mod partitioned;

pub use collecting::CollectingSink;
pub use json_lines::JsonLinesSink;
pub use partitioned::PartitionedSink;
