//! Core utilities and types shared across all BatSEQ crates

pub mod config;
pub mod error;
pub mod system;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, save_config, Config};
pub use error::{BatseqError, BatseqResult};

// Re-export core types
pub use types::{AlignmentHit, ColumnKind, Numeric, OutputColumn, ResultTable, OUTPUT_COLUMNS};

// Re-export system utilities
pub use system::{
    batseq_databases_dir, batseq_home, batseq_scratch_dir, default_database_base, describe_paths,
};

/// Version information for the BatSEQ project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
