// Output chunking. Planning is pure (plan.rs); the writer reads, decodes
// and writes files (writer.rs).

pub mod plan;
pub mod writer;

pub use plan::{plan_chunks, ChunkNames, ChunkPlan, PartPlan};
pub use writer::{ChunkWriter, SplitOutcome};
