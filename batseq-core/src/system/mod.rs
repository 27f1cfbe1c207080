pub mod paths;

// Re-export commonly used functions
pub use paths::{
    batseq_databases_dir, batseq_home, batseq_scratch_dir, default_database_base, describe_paths,
    is_custom_data_dir, DEFAULT_DATABASE_NAME,
};
