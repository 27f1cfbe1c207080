use super::column::OutputColumn;
use super::numeric::Numeric;
use serde::Serialize;

/// One row of a tabular BLAST report.
///
/// `None` marks a field the line did not have (short line).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentHit {
    pub qseqid: Option<String>,
    pub stitle: Option<String>,
    pub pident: Option<Numeric>,
    pub length: Option<Numeric>,
    pub mismatch: Option<Numeric>,
    pub gapopen: Option<Numeric>,
    pub qstart: Option<Numeric>,
    pub qend: Option<Numeric>,
    pub sstart: Option<Numeric>,
    pub send: Option<Numeric>,
    pub evalue: Option<Numeric>,
    pub bitscore: Option<Numeric>,
}

impl AlignmentHit {
    /// Store a raw field, coercing numeric columns
    pub fn set(&mut self, column: OutputColumn, raw: &str) {
        let num = || Some(Numeric::parse(raw));
        match column {
            OutputColumn::QuerySeqId => self.qseqid = Some(raw.to_string()),
            OutputColumn::SubjectTitle => self.stitle = Some(raw.to_string()),
            OutputColumn::PercentIdentity => self.pident = num(),
            OutputColumn::AlignmentLength => self.length = num(),
            OutputColumn::Mismatches => self.mismatch = num(),
            OutputColumn::GapOpens => self.gapopen = num(),
            OutputColumn::QueryStart => self.qstart = num(),
            OutputColumn::QueryEnd => self.qend = num(),
            OutputColumn::SubjectStart => self.sstart = num(),
            OutputColumn::SubjectEnd => self.send = num(),
            OutputColumn::EValue => self.evalue = num(),
            OutputColumn::BitScore => self.bitscore = num(),
        }
    }

    pub fn numeric(&self, column: OutputColumn) -> Option<Numeric> {
        match column {
            OutputColumn::QuerySeqId | OutputColumn::SubjectTitle => None,
            OutputColumn::PercentIdentity => self.pident,
            OutputColumn::AlignmentLength => self.length,
            OutputColumn::Mismatches => self.mismatch,
            OutputColumn::GapOpens => self.gapopen,
            OutputColumn::QueryStart => self.qstart,
            OutputColumn::QueryEnd => self.qend,
            OutputColumn::SubjectStart => self.sstart,
            OutputColumn::SubjectEnd => self.send,
            OutputColumn::EValue => self.evalue,
            OutputColumn::BitScore => self.bitscore,
        }
    }

    /// Render a cell for terminal output; missing fields are empty
    pub fn display_value(&self, column: OutputColumn) -> String {
        match column {
            OutputColumn::QuerySeqId => self.qseqid.clone().unwrap_or_default(),
            OutputColumn::SubjectTitle => self.stitle.clone().unwrap_or_default(),
            other => self
                .numeric(other)
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Search response: fixed column list plus rows in tool order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<AlignmentHit>,
}

impl ResultTable {
    pub fn new(rows: Vec<AlignmentHit>) -> Self {
        Self {
            columns: OutputColumn::names(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Best hit as ranked by blastn (first row)
    pub fn top_hit(&self) -> Option<&AlignmentHit> {
        self.rows.first()
    }
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
