//! Shared result types for BLAST tabular searches

pub mod column;
pub mod hit;
pub mod numeric;

pub use column::{ColumnKind, OutputColumn, OUTPUT_COLUMNS};
pub use hit::{AlignmentHit, ResultTable};
pub use numeric::Numeric;
