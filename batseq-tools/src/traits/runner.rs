/// Traits for external alignment tools
use crate::types::ToolOutput;
use async_trait::async_trait;
use batseq_core::BatseqResult;
use std::path::Path;

/// An external alignment search executable.
///
/// `run` reports how the process ended; deciding whether a non-zero exit is
/// fatal is left to the caller. Spawn failures, output overruns and timeouts
/// are returned as `ExecutionFailed`.
#[async_trait]
pub trait AlignmentRunner: Send + Sync {
    /// Short tool name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Search `query` (a FASTA file) against the database at `database`
    async fn run(&self, query: &Path, database: &Path, outfmt: &str) -> BatseqResult<ToolOutput>;

    /// Get tool version
    async fn version(&self) -> BatseqResult<String>;

    /// Check if tool is available
    fn is_available(&self) -> bool;
}
