//! Test fixtures and data generators

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The canonical single-hit report line
pub const SPECIES_X_LINE: &str =
    "query\tSpeciesX\t99.5\t150\t1\t0\t1\t150\t10\t160\t1e-70\t250";

/// Tabular report with `rows` hits ranked by descending bitscore
pub fn sample_report(rows: usize) -> String {
    (0..rows)
        .map(|i| {
            format!(
                "query\tSubject{}\t{:.1}\t150\t{}\t0\t1\t150\t10\t160\t1e-{}\t{}\n",
                i,
                99.5 - i as f64,
                i,
                70 - i.min(60),
                250 - i.min(200)
            )
        })
        .collect()
}

/// Test sequence with an optional description
#[derive(Debug, Clone)]
pub struct TestSequence {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl TestSequence {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            sequence: sequence.into(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Convert to FASTA format
    pub fn to_fasta(&self) -> String {
        if self.description.is_empty() {
            format!(">{}\n{}\n", self.id, self.sequence)
        } else {
            format!(">{} {}\n{}\n", self.id, self.description, self.sequence)
        }
    }
}

/// Generate random DNA sequences
pub fn generate_sequences(count: usize, length: usize) -> Vec<TestSequence> {
    let mut rng = StdRng::seed_from_u64(42); // Deterministic for tests
    let bases = ['A', 'T', 'G', 'C'];

    (0..count)
        .map(|i| {
            let sequence: String = (0..length).map(|_| bases[rng.gen_range(0..4)]).collect();
            TestSequence::new(format!("seq_{}", i), sequence)
        })
        .collect()
}

/// Concatenate records into one FASTA document
pub fn create_test_fasta(sequences: &[TestSequence]) -> String {
    sequences.iter().map(|s| s.to_fasta()).collect()
}

/// Short bat mitochondrial fragments
pub fn bat_sequences() -> Vec<TestSequence> {
    vec![
        TestSequence::new("MLUC_COI", "AACTTTATACTTAATTTTTGGTGCATGAGCAGGAATAGTAGGAAC")
            .with_description("Myotis lucifugus cytochrome oxidase I"),
        TestSequence::new("EFUS_CYTB", "ATGACCAACATCCGAAAAACCCACCCACTAGCAAAAATTGTAAAC")
            .with_description("Eptesicus fuscus cytochrome b"),
        TestSequence::new("TBRA_COI", "GGCACCCTTTATCTAATTTTCGGCGCATGAGCCGGAATAGTGGGT")
            .with_description("Tadarida brasiliensis cytochrome oxidase I"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_generation() {
        let sequences = generate_sequences(10, 100);
        assert_eq!(sequences.len(), 10);
        assert_eq!(sequences[0].sequence.len(), 100);

        // Should be deterministic
        let sequences2 = generate_sequences(10, 100);
        assert_eq!(sequences[0].sequence, sequences2[0].sequence);
    }

    #[test]
    fn test_fasta_generation() {
        let fasta = create_test_fasta(&bat_sequences());
        assert!(fasta.starts_with(">MLUC_COI Myotis lucifugus"));
        assert_eq!(fasta.matches('>').count(), 3);
    }

    #[test]
    fn test_sample_report_shape() {
        let report = sample_report(3);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert_eq!(line.split('\t').count(), 12);
        }
        assert_eq!(SPECIES_X_LINE.split('\t').count(), 12);
    }
}
