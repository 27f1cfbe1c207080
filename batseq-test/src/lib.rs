//! Test utilities for the BatSEQ workspace
//!
//! Common helpers shared by the crate test suites:
//!
//! - **Test Environment**: temporary directories with a database, scratch
//!   area and fake tool location, removed on drop
//! - **Fake tools**: shell scripts standing in for `blastn`
//! - **Fixtures**: report lines and FASTA sequences
//! - **Assertions**: staging cleanup and error body checks

pub mod assertions;
pub mod environment;
pub mod fixtures;
pub mod scripts;

// Re-export commonly used items
pub use assertions::{assert_error_message, assert_no_staged_files, assert_valid_fasta};
pub use environment::{TestConfig, TestEnvironment};
pub use fixtures::{
    create_test_fasta, generate_sequences, sample_report, TestSequence, SPECIES_X_LINE,
};
pub use scripts::{FakeBlastn, FakeTool, FAKE_VERSION};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (call once per test module)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

/// Run a test with a clean environment
///
/// # Example
/// ```rust
/// use batseq_test::with_test_env;
///
/// with_test_env(|env| {
///     env.create_database()?;
///     assert!(env.database_base().with_extension("nsq").exists());
///     Ok(())
/// })
/// .unwrap();
/// ```
pub fn with_test_env<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::new()?;
    f(&env)
}
