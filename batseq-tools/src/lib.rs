//! Integration with the external BLASTN alignment tool
//!
//! This crate stages nucleotide queries as FASTA files, runs `blastn`
//! against a pre-built reference database and turns its tabular report
//! into a [`ResultTable`](batseq_core::ResultTable).

// Modules
pub mod aligners;
pub mod database;
pub mod service;
pub mod staging;
pub mod testing;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use aligners::blastn::{parse_tabular, BlastnRunner, SearchOptions};
pub use database::ReferenceDatabase;
pub use service::SequenceSearchService;
pub use staging::{SequentialPathGenerator, StagedQuery, StagingPathGenerator, UuidPathGenerator};
pub use testing::MockRunner;
pub use traits::AlignmentRunner;
pub use types::{DatabaseStatus, ServiceStatus, ToolOutput, ToolStatus};
