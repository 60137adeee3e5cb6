//! Shard orchestration
//!
//! Runs one template translator over a partitioned primitive stream and
//! folds the shard accumulators back together.

pub mod input;
pub mod orchestrator;
pub mod result;

pub use crate::shared::CancellationToken;
pub use input::{read_primitives, read_primitives_file};
pub use orchestrator::{partition, reduce, ShardOrchestrator};
pub use result::{RunMetadata, RunReport, TranslationRun};
