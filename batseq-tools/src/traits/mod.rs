pub mod runner;

pub use runner::AlignmentRunner;
