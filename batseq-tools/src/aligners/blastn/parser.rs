/// Parser for blastn tabular output (`-outfmt 6` with the BatSEQ columns)
use batseq_core::{AlignmentHit, BatseqError, BatseqResult, ResultTable, OUTPUT_COLUMNS};

/// Parse raw blastn stdout into a result table
pub fn parse_tabular(stdout: &[u8]) -> BatseqResult<ResultTable> {
    let text = std::str::from_utf8(stdout).map_err(|e| {
        BatseqError::ParseFailed(format!("output is not valid UTF-8: {}", e))
    })?;
    Ok(parse_tabular_str(text))
}

/// Parse tabular report text. Blank lines are skipped; short lines leave the
/// trailing fields empty and extra fields are ignored.
pub fn parse_tabular_str(text: &str) -> ResultTable {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect();
    ResultTable::new(rows)
}

fn parse_line(line: &str) -> AlignmentHit {
    let mut hit = AlignmentHit::default();
    let mut fields = line.split('\t');

    for column in OUTPUT_COLUMNS {
        match fields.next() {
            Some(raw) => hit.set(column, raw),
            None => break,
        }
    }

    let extra = fields.count();
    if extra > 0 {
        tracing::debug!("Ignoring {} extra field(s) in blastn output line", extra);
    }

    hit
}
