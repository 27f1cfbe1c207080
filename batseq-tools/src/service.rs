//! Sequence search against the reference database

use crate::aligners::blastn::{parse_tabular, BlastnRunner};
use crate::database::ReferenceDatabase;
use crate::staging::{query_fasta, StagedQuery, StagingPathGenerator, UuidPathGenerator};
use crate::traits::AlignmentRunner;
use crate::types::{ServiceStatus, ToolStatus};
use batseq_core::{BatseqError, BatseqResult, Config, OutputColumn, ResultTable};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Runs one nucleotide query per call against a shared read-only database.
///
/// The service holds no per-search state; concurrent calls each stage their
/// own query file and spawn their own process.
pub struct SequenceSearchService {
    runner: Arc<dyn AlignmentRunner>,
    database: ReferenceDatabase,
    scratch_dir: PathBuf,
    paths: Arc<dyn StagingPathGenerator>,
}

impl SequenceSearchService {
    pub fn new(
        runner: Arc<dyn AlignmentRunner>,
        database: ReferenceDatabase,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            database,
            scratch_dir: scratch_dir.into(),
            paths: Arc::new(UuidPathGenerator),
        }
    }

    pub fn with_path_generator(mut self, paths: Arc<dyn StagingPathGenerator>) -> Self {
        self.paths = paths;
        self
    }

    /// Production service: real blastn, database and scratch directory from
    /// configuration
    pub fn from_config(config: &Config) -> Self {
        let runner = BlastnRunner::from_config(&config.blast);
        Self::new(
            Arc::new(runner),
            ReferenceDatabase::new(config.blast.database_base()),
            config.staging.scratch_dir(),
        )
    }

    pub fn database(&self) -> &ReferenceDatabase {
        &self.database
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn runner(&self) -> &dyn AlignmentRunner {
        self.runner.as_ref()
    }

    /// Search one sequence (bare or FASTA) and return the parsed hit table
    pub async fn search(&self, sequence: &str) -> BatseqResult<ResultTable> {
        let start = Instant::now();

        let fasta = query_fasta(sequence)?;
        self.database.verify()?;

        let staged = StagedQuery::create(self.paths.next_path(&self.scratch_dir), &fasta)?;
        let result = self
            .runner
            .run(staged.path(), self.database.base(), &OutputColumn::outfmt())
            .await;
        drop(staged);

        let output = result?;
        if !output.success() {
            let message = output.diagnostic();
            tracing::error!("{} failed: {}", self.runner.name(), message);
            return Err(BatseqError::ExecutionFailed(message));
        }

        let stderr = output.stderr_text();
        if !stderr.is_empty() {
            tracing::warn!("{} stderr: {}", self.runner.name(), stderr);
        }

        let table = parse_tabular(&output.stdout)?;
        tracing::info!(
            hits = table.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search against {} complete",
            self.database.name()
        );
        Ok(table)
    }

    /// Readiness of the tool and database, without running a search
    pub async fn status(&self) -> ServiceStatus {
        let available = self.runner.is_available();
        let version = if available {
            match self.runner.version().await {
                Ok(v) if !v.is_empty() => Some(v),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Could not determine {} version: {}", self.runner.name(), e);
                    None
                }
            }
        } else {
            None
        };

        ServiceStatus {
            tool: ToolStatus {
                name: self.runner.name().to_string(),
                available,
                version,
            },
            database: self.database.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::REQUIRED_EXTENSIONS;
    use crate::staging::SequentialPathGenerator;
    use crate::testing::MockRunner;
    use batseq_core::Numeric;
    use tempfile::TempDir;

    const SPECIES_X: &str = "query\tSpeciesX\t99.5\t150\t1\t0\t1\t150\t10\t160\t1e-70\t250\n";

    struct Fixture {
        _dir: TempDir,
        scratch: PathBuf,
        database: ReferenceDatabase,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let scratch = dir.path().join("scratch");
        let database = ReferenceDatabase::new(dir.path().join("mybatdb"));
        for ext in REQUIRED_EXTENSIONS {
            std::fs::write(database.artifact_path(ext), b"").unwrap();
        }
        Fixture {
            _dir: dir,
            scratch,
            database,
        }
    }

    fn staged_files(scratch: &Path) -> usize {
        std::fs::read_dir(scratch).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_species_x_search() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new().with_stdout(SPECIES_X));
        let service =
            SequenceSearchService::new(runner.clone(), fx.database.clone(), &fx.scratch);

        let table = service.search("ACGTACGTACGT").await.unwrap();
        assert_eq!(table.len(), 1);
        let hit = table.top_hit().unwrap();
        assert_eq!(hit.stitle.as_deref(), Some("SpeciesX"));
        assert_eq!(hit.pident, Some(Numeric::Float(99.5)));
        assert_eq!(hit.bitscore, Some(Numeric::Int(250)));

        assert_eq!(runner.call_count(), 1);
        assert_eq!(runner.seen_contents(), vec![">query\nACGTACGTACGT\n".to_string()]);
        assert_eq!(staged_files(&fx.scratch), 0);
    }

    #[tokio::test]
    async fn test_empty_input_rejected_before_side_effects() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new());
        let service =
            SequenceSearchService::new(runner.clone(), fx.database.clone(), &fx.scratch);

        let err = service.search("  \n ").await.unwrap_err();
        assert!(matches!(err, BatseqError::InvalidInput(_)));
        assert_eq!(runner.call_count(), 0);
        assert!(!fx.scratch.exists());
    }

    #[tokio::test]
    async fn test_missing_database_never_runs_tool() {
        let fx = fixture();
        std::fs::remove_file(fx.database.artifact_path("nsq")).unwrap();
        let runner = Arc::new(MockRunner::new());
        let service =
            SequenceSearchService::new(runner.clone(), fx.database.clone(), &fx.scratch);

        match service.search("ACGT").await {
            Err(BatseqError::DatabaseUnavailable { artifact }) => {
                assert_eq!(artifact, "mybatdb.nsq")
            }
            other => panic!("Expected DatabaseUnavailable, got {:?}", other),
        }
        assert_eq!(runner.call_count(), 0);
        assert_eq!(staged_files(&fx.scratch), 0);
    }

    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let fx = fixture();
        let runner = Arc::new(
            MockRunner::new()
                .with_exit_code(1)
                .with_stderr("no hits found\n"),
        );
        let service = SequenceSearchService::new(runner, fx.database.clone(), &fx.scratch);

        match service.search("ACGT").await {
            Err(BatseqError::ExecutionFailed(msg)) => assert_eq!(msg, "no hits found"),
            other => panic!("Expected ExecutionFailed, got {:?}", other),
        }
        assert_eq!(staged_files(&fx.scratch), 0);
    }

    #[tokio::test]
    async fn test_runner_error_still_cleans_up() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new().with_failure("blastn timed out after 1s"));
        let service = SequenceSearchService::new(runner, fx.database.clone(), &fx.scratch);

        let err = service.search("ACGT").await.unwrap_err();
        assert!(matches!(err, BatseqError::ExecutionFailed(_)));
        assert_eq!(staged_files(&fx.scratch), 0);
    }

    #[tokio::test]
    async fn test_stderr_with_success_is_not_fatal() {
        let fx = fixture();
        let runner = Arc::new(
            MockRunner::new()
                .with_stdout(SPECIES_X)
                .with_stderr("Warning: [blastn] Query is just 4 bases"),
        );
        let service = SequenceSearchService::new(runner, fx.database.clone(), &fx.scratch);

        let table = service.search("ACGT").await.unwrap();
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_utf8_output_is_parse_failure() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new().with_stdout_bytes(vec![0xff, 0xfe, b'\n']));
        let service = SequenceSearchService::new(runner, fx.database.clone(), &fx.scratch);

        let err = service.search("ACGT").await.unwrap_err();
        assert!(matches!(err, BatseqError::ParseFailed(_)));
        assert_eq!(staged_files(&fx.scratch), 0);
    }

    #[tokio::test]
    async fn test_fasta_input_passed_verbatim() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new());
        let service =
            SequenceSearchService::new(runner.clone(), fx.database.clone(), &fx.scratch)
                .with_path_generator(Arc::new(SequentialPathGenerator::new("t")));

        service.search(">bat1 Myotis\nACGT\n").await.unwrap();
        assert_eq!(runner.seen_contents(), vec![">bat1 Myotis\nACGT".to_string()]);
        assert_eq!(runner.seen_queries(), vec![fx.scratch.join("t-1.fa")]);
    }

    /// Leaves a non-empty directory where the staged file was, so removal fails
    struct DirectorySwapRunner {
        inner: MockRunner,
    }

    #[async_trait::async_trait]
    impl AlignmentRunner for DirectorySwapRunner {
        fn name(&self) -> &str {
            "directory-swap"
        }

        async fn run(
            &self,
            query: &Path,
            database: &Path,
            outfmt: &str,
        ) -> BatseqResult<crate::types::ToolOutput> {
            let output = self.inner.run(query, database, outfmt).await?;
            std::fs::remove_file(query)?;
            std::fs::create_dir_all(query.join("nested"))?;
            Ok(output)
        }

        async fn version(&self) -> BatseqResult<String> {
            self.inner.version().await
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_cleanup_failure_does_not_fail_search() {
        let fx = fixture();
        let runner = Arc::new(DirectorySwapRunner {
            inner: MockRunner::new().with_stdout(SPECIES_X),
        });
        let service = SequenceSearchService::new(runner, fx.database.clone(), &fx.scratch)
            .with_path_generator(Arc::new(SequentialPathGenerator::new("swap")));

        let table = service.search("ACGT").await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].stitle.as_deref(), Some("SpeciesX"));
        assert!(fx.scratch.join("swap-1.fa").is_dir());
    }

    #[tokio::test]
    async fn test_path_collision_is_staging_error() {
        let fx = fixture();
        std::fs::create_dir_all(&fx.scratch).unwrap();
        std::fs::write(fx.scratch.join("t-1.fa"), "occupied").unwrap();

        let runner = Arc::new(MockRunner::new());
        let service =
            SequenceSearchService::new(runner.clone(), fx.database.clone(), &fx.scratch)
                .with_path_generator(Arc::new(SequentialPathGenerator::new("t")));

        let err = service.search("ACGT").await.unwrap_err();
        assert!(matches!(err, BatseqError::Staging(_)));
        assert_eq!(runner.call_count(), 0);
        assert_eq!(
            std::fs::read_to_string(fx.scratch.join("t-1.fa")).unwrap(),
            "occupied"
        );
    }

    #[tokio::test]
    async fn test_status_reports_tool_and_database() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new().with_version("blastn: 2.15.0+"));
        let service = SequenceSearchService::new(runner, fx.database.clone(), &fx.scratch);

        let status = service.status().await;
        assert!(status.ready());
        assert_eq!(status.tool.name, "mock");
        assert_eq!(status.tool.version.as_deref(), Some("blastn: 2.15.0+"));
        assert_eq!(status.database.name, "mybatdb");
    }

    #[tokio::test]
    async fn test_status_unavailable_tool_has_no_version() {
        let fx = fixture();
        let runner = Arc::new(MockRunner::new().unavailable());
        let service = SequenceSearchService::new(runner, fx.database.clone(), &fx.scratch);

        let status = service.status().await;
        assert!(!status.ready());
        assert!(!status.tool.available);
        assert!(status.tool.version.is_none());
    }
}
