//! Query staging: FASTA normalization and scratch files that clean up after
//! themselves

use batseq_core::{BatseqError, BatseqResult};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Header given to bare sequences
pub const DEFAULT_QUERY_ID: &str = "query";

/// Normalize user input into FASTA text.
///
/// Input already starting with `>` is passed through trimmed; anything else
/// is wrapped as a single record named `query`.
pub fn query_fasta(sequence: &str) -> BatseqResult<String> {
    let trimmed = sequence.trim();
    if trimmed.is_empty() {
        return Err(BatseqError::InvalidInput(
            "Sequence is required and cannot be empty".to_string(),
        ));
    }

    if trimmed.starts_with('>') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!(">{}\n{}\n", DEFAULT_QUERY_ID, trimmed))
    }
}

/// Identifier of the first record: header text up to the first whitespace
pub fn query_id(fasta: &str) -> Option<&str> {
    let header = fasta.lines().find(|l| l.starts_with('>'))?;
    header[1..].split_whitespace().next()
}

/// Chooses where the next query file goes
pub trait StagingPathGenerator: Send + Sync {
    fn next_path(&self, scratch_dir: &Path) -> PathBuf;
}

/// `query-<uuid>.fa`, unique across processes
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidPathGenerator;

impl StagingPathGenerator for UuidPathGenerator {
    fn next_path(&self, scratch_dir: &Path) -> PathBuf {
        scratch_dir.join(format!("query-{}.fa", uuid::Uuid::new_v4()))
    }
}

/// `<prefix>-<n>.fa` with a per-generator counter. Deterministic, for tests
/// and single-process tooling.
#[derive(Debug)]
pub struct SequentialPathGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialPathGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialPathGenerator {
    fn default() -> Self {
        Self::new("query")
    }
}

impl StagingPathGenerator for SequentialPathGenerator {
    fn next_path(&self, scratch_dir: &Path) -> PathBuf {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        scratch_dir.join(format!("{}-{}.fa", self.prefix, n))
    }
}

/// A query file on disk, removed when dropped
#[derive(Debug)]
pub struct StagedQuery {
    path: PathBuf,
}

impl StagedQuery {
    /// Write `content` to a new file at `path`. An existing file is never
    /// overwritten.
    pub fn create(path: PathBuf, content: &str) -> BatseqResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(BatseqError::Staging)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(BatseqError::Staging)?;

        // From here on the file exists and must be removed on every path
        let staged = Self { path };
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(BatseqError::Staging)?;

        tracing::debug!("Staged query at {}", staged.path.display());
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedQuery {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed staged query {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to remove staged query {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
