/// Test doubles for the alignment tool
pub mod mock;

pub use mock::MockRunner;
