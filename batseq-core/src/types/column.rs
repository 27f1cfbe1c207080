//! Column layout of the tabular (`-outfmt 6`) BLAST report

use serde::{Deserialize, Serialize};

/// Whether a column stays text or is coerced to a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
}

/// One requested field of the tabular report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputColumn {
    QuerySeqId,
    SubjectTitle,
    PercentIdentity,
    AlignmentLength,
    Mismatches,
    GapOpens,
    QueryStart,
    QueryEnd,
    SubjectStart,
    SubjectEnd,
    EValue,
    BitScore,
}

/// The twelve columns requested from blastn, in output order
pub const OUTPUT_COLUMNS: [OutputColumn; 12] = [
    OutputColumn::QuerySeqId,
    OutputColumn::SubjectTitle,
    OutputColumn::PercentIdentity,
    OutputColumn::AlignmentLength,
    OutputColumn::Mismatches,
    OutputColumn::GapOpens,
    OutputColumn::QueryStart,
    OutputColumn::QueryEnd,
    OutputColumn::SubjectStart,
    OutputColumn::SubjectEnd,
    OutputColumn::EValue,
    OutputColumn::BitScore,
];

impl OutputColumn {
    /// BLAST format specifier, also used as the JSON key
    pub fn name(&self) -> &'static str {
        match self {
            OutputColumn::QuerySeqId => "qseqid",
            OutputColumn::SubjectTitle => "stitle",
            OutputColumn::PercentIdentity => "pident",
            OutputColumn::AlignmentLength => "length",
            OutputColumn::Mismatches => "mismatch",
            OutputColumn::GapOpens => "gapopen",
            OutputColumn::QueryStart => "qstart",
            OutputColumn::QueryEnd => "qend",
            OutputColumn::SubjectStart => "sstart",
            OutputColumn::SubjectEnd => "send",
            OutputColumn::EValue => "evalue",
            OutputColumn::BitScore => "bitscore",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            OutputColumn::QuerySeqId | OutputColumn::SubjectTitle => ColumnKind::Text,
            _ => ColumnKind::Numeric,
        }
    }

    /// Column names in output order
    pub fn names() -> Vec<String> {
        OUTPUT_COLUMNS.iter().map(|c| c.name().to_string()).collect()
    }

    /// Value for blastn's `-outfmt` argument
    pub fn outfmt() -> String {
        let fields: Vec<&str> = OUTPUT_COLUMNS.iter().map(|c| c.name()).collect();
        format!("6 {}", fields.join(" "))
    }
}

impl std::fmt::Display for OutputColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for OutputColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OUTPUT_COLUMNS
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown output column: {}", s))
    }
}
