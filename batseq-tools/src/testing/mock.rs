//! Mock runner for service and HTTP tests

use crate::staging::query_id;
use crate::traits::AlignmentRunner;
use crate::types::ToolOutput;
use async_trait::async_trait;
use batseq_core::{BatseqError, BatseqResult};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned-output runner that never spawns a process.
///
/// Each call checks that the staged query exists and records its path and
/// contents. With `with_echo_query` the report is a single row whose query
/// and subject identify the staged record, so concurrent callers can tell
/// their results apart.
pub struct MockRunner {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_code: Option<i32>,
    failure: Option<String>,
    delay: Option<Duration>,
    echo_query: bool,
    available: bool,
    version: String,
    calls: AtomicUsize,
    seen_queries: Mutex<Vec<PathBuf>>,
    seen_contents: Mutex<Vec<String>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: Some(0),
            failure: None,
            delay: None,
            echo_query: false,
            available: true,
            version: "MockRunner 1.0.0".to_string(),
            calls: AtomicUsize::new(0),
            seen_queries: Mutex::new(Vec::new()),
            seen_contents: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stdout(self, stdout: &str) -> Self {
        self.with_stdout_bytes(stdout.as_bytes().to_vec())
    }

    pub fn with_stdout_bytes(mut self, stdout: Vec<u8>) -> Self {
        self.stdout = stdout;
        self
    }

    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.stderr = stderr.as_bytes().to_vec();
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Fail every run with `ExecutionFailed(message)`
    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_echo_query(mut self) -> Self {
        self.echo_query = true;
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_queries(&self) -> Vec<PathBuf> {
        self.seen_queries.lock().clone()
    }

    pub fn seen_contents(&self) -> Vec<String> {
        self.seen_contents.lock().clone()
    }
}

fn echo_row(id: &str) -> String {
    format!(
        "{id}\tEcho {id}\t100.0\t12\t0\t0\t1\t12\t1\t12\t1e-5\t24.3\n",
        id = id
    )
}

#[async_trait]
impl AlignmentRunner for MockRunner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn run(&self, query: &Path, _database: &Path, _outfmt: &str) -> BatseqResult<ToolOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let contents = tokio::fs::read_to_string(query).await.map_err(|e| {
            BatseqError::ExecutionFailed(format!(
                "query file {} unreadable: {}",
                query.display(),
                e
            ))
        })?;
        self.seen_queries.lock().push(query.to_path_buf());
        self.seen_contents.lock().push(contents.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.failure {
            return Err(BatseqError::ExecutionFailed(message.clone()));
        }

        let stdout = if self.echo_query {
            echo_row(query_id(&contents).unwrap_or("unknown")).into_bytes()
        } else {
            self.stdout.clone()
        };

        Ok(ToolOutput {
            exit_code: self.exit_code,
            stdout,
            stderr: self.stderr.clone(),
        })
    }

    async fn version(&self) -> BatseqResult<String> {
        Ok(self.version.clone())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
