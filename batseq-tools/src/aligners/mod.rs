/// External alignment tool implementations
pub mod blastn;

pub use blastn::{BlastnRunner, SearchOptions};
