//! BLASTN runner implementation

mod capture;
mod parser;

pub use parser::{parse_tabular, parse_tabular_str};

use crate::traits::AlignmentRunner;
use crate::types::ToolOutput;
use async_trait::async_trait;
use batseq_core::config::BlastConfig;
use batseq_core::{BatseqError, BatseqResult};
use capture::{read_bounded, CaptureError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;

const BINARY_NAME: &str = "blastn";
const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Optional search tuning passed straight through to blastn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub num_threads: Option<usize>,
    pub max_target_seqs: Option<usize>,
    pub evalue: Option<f64>,
}

impl SearchOptions {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(threads) = self.num_threads {
            args.push("-num_threads".into());
            args.push(threads.to_string().into());
        }
        if let Some(max) = self.max_target_seqs {
            args.push("-max_target_seqs".into());
            args.push(max.to_string().into());
        }
        if let Some(evalue) = self.evalue {
            args.push("-evalue".into());
            args.push(evalue.to_string().into());
        }
        args
    }
}

/// Runs the NCBI `blastn` executable as a child process
#[derive(Debug, Clone)]
pub struct BlastnRunner {
    binary_path: PathBuf,
    timeout: Duration,
    max_output_bytes: usize,
    options: SearchOptions,
}

impl BlastnRunner {
    pub fn new(binary_path: PathBuf) -> Self {
        let defaults = BlastConfig::default();
        Self {
            binary_path,
            timeout: defaults.timeout(),
            max_output_bytes: defaults.max_output_bytes,
            options: SearchOptions::default(),
        }
    }

    /// Find `blastn` on PATH; the bare name is kept when lookup fails so the
    /// spawn error names the missing program
    pub fn locate() -> Self {
        let path = which::which(BINARY_NAME).unwrap_or_else(|_| PathBuf::from(BINARY_NAME));
        Self::new(path)
    }

    pub fn from_config(config: &BlastConfig) -> Self {
        let runner = match &config.binary {
            Some(binary) => Self::new(PathBuf::from(binary)),
            None => Self::locate(),
        };
        runner
            .with_timeout(config.timeout())
            .with_max_output_bytes(config.max_output_bytes)
            .with_options(SearchOptions {
                num_threads: config.num_threads,
                max_target_seqs: config.max_target_seqs,
                evalue: config.evalue,
            })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = limit;
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full argument list for one search
    pub fn build_args(&self, query: &Path, database: &Path, outfmt: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-query".into(),
            query.as_os_str().to_owned(),
            "-db".into(),
            database.as_os_str().to_owned(),
            "-outfmt".into(),
            outfmt.into(),
        ];
        args.extend(self.options.to_args());
        args
    }

    /// The binary path stays in the log; callers only see the tool name
    fn start_failed(&self, e: std::io::Error) -> BatseqError {
        tracing::error!(binary = %self.binary_path.display(), "Failed to start blastn: {}", e);
        BatseqError::ExecutionFailed(format!("failed to start {}: {}", BINARY_NAME, e))
    }

    async fn kill(&self, child: &mut tokio::process::Child) {
        if let Err(e) = child.kill().await {
            tracing::warn!("Failed to kill {}: {}", self.binary_path.display(), e);
        }
    }
}

#[async_trait]
impl AlignmentRunner for BlastnRunner {
    fn name(&self) -> &str {
        BINARY_NAME
    }

    async fn run(&self, query: &Path, database: &Path, outfmt: &str) -> BatseqResult<ToolOutput> {
        let args = self.build_args(query, database, outfmt);
        tracing::debug!(
            binary = %self.binary_path.display(),
            query = %query.display(),
            database = %database.display(),
            "Spawning blastn"
        );

        let mut child = Command::new(&self.binary_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.start_failed(e))?;

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                self.kill(&mut child).await;
                return Err(BatseqError::ExecutionFailed(
                    "blastn output pipes were not captured".to_string(),
                ));
            }
        };

        let limit = self.max_output_bytes;
        let outcome = tokio::time::timeout(self.timeout, async {
            let (out, err) = tokio::try_join!(
                read_bounded(stdout, limit, "stdout"),
                read_bounded(stderr, limit, "stderr")
            )?;
            let status: ExitStatus = child.wait().await.map_err(|source| CaptureError::Io {
                stream: "exit status",
                source,
            })?;
            Ok::<_, CaptureError>((out, err, status))
        })
        .await;

        match outcome {
            Ok(Ok((stdout, stderr, status))) => {
                tracing::debug!(
                    exit_code = ?status.code(),
                    stdout_bytes = stdout.len(),
                    stderr_bytes = stderr.len(),
                    "blastn finished"
                );
                Ok(ToolOutput {
                    exit_code: status.code(),
                    stdout,
                    stderr,
                })
            }
            Ok(Err(e)) => {
                self.kill(&mut child).await;
                Err(BatseqError::ExecutionFailed(format!("blastn {}", e)))
            }
            Err(_) => {
                self.kill(&mut child).await;
                Err(BatseqError::ExecutionFailed(format!(
                    "blastn timed out after {}s",
                    self.timeout.as_secs_f64()
                )))
            }
        }
    }

    async fn version(&self) -> BatseqResult<String> {
        let mut cmd = Command::new(&self.binary_path);
        cmd.arg("-version").stdin(Stdio::null()).kill_on_drop(true);

        let output = tokio::time::timeout(VERSION_TIMEOUT, cmd.output())
            .await
            .map_err(|_| BatseqError::ExecutionFailed("blastn -version timed out".to_string()))?
            .map_err(|e| self.start_failed(e))?;

        if !output.status.success() {
            return Err(BatseqError::ExecutionFailed(format!(
                "blastn -version exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or("").trim().to_string())
    }

    fn is_available(&self) -> bool {
        if self.binary_path.components().count() > 1 {
            is_executable(&self.binary_path)
        } else {
            which::which(&self.binary_path).is_ok()
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use batseq_core::OutputColumn;

    #[test]
    fn test_build_args_minimal() {
        let runner = BlastnRunner::new(PathBuf::from("/opt/blast/bin/blastn"));
        let args = runner.build_args(
            Path::new("/tmp/query-1.fa"),
            Path::new("data/mybatdb"),
            &OutputColumn::outfmt(),
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args.len(), 6);
        assert_eq!(args[0], "-query");
        assert_eq!(args[1], "/tmp/query-1.fa");
        assert_eq!(args[2], "-db");
        assert_eq!(args[3], "data/mybatdb");
        assert_eq!(args[4], "-outfmt");
        assert!(args[5].starts_with("6 qseqid stitle pident"));
    }

    #[test]
    fn test_build_args_with_options() {
        let runner = BlastnRunner::new(PathBuf::from("blastn")).with_options(SearchOptions {
            num_threads: Some(4),
            max_target_seqs: Some(25),
            evalue: Some(0.001),
        });
        let args: Vec<String> = runner
            .build_args(Path::new("q.fa"), Path::new("db"), "6")
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            &args[6..],
            &["-num_threads", "4", "-max_target_seqs", "25", "-evalue", "0.001"]
        );
    }

    #[test]
    fn test_from_config() {
        let config = BlastConfig {
            binary: Some("/usr/local/bin/blastn".to_string()),
            timeout_secs: 12,
            max_output_bytes: 2048,
            num_threads: Some(2),
            ..Default::default()
        };
        let runner = BlastnRunner::from_config(&config);
        assert_eq!(runner.binary_path(), Path::new("/usr/local/bin/blastn"));
        assert_eq!(runner.timeout(), Duration::from_secs(12));
        assert_eq!(runner.max_output_bytes, 2048);
        assert_eq!(runner.options.num_threads, Some(2));
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let runner = BlastnRunner::new(PathBuf::from("/nonexistent/dir/blastn"));
        assert!(!runner.is_available());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_execution_failed() {
        let runner = BlastnRunner::new(PathBuf::from("/nonexistent/dir/blastn"));
        let err = runner
            .run(Path::new("q.fa"), Path::new("db"), "6")
            .await
            .unwrap_err();
        match err {
            BatseqError::ExecutionFailed(msg) => {
                assert!(msg.starts_with("failed to start blastn: "), "{}", msg);
                assert!(!msg.contains("/nonexistent"), "{}", msg);
            }
            other => panic!("Expected ExecutionFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_unavailable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let binary = dir.path().join("blastn");
        std::fs::write(&binary, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o644)).unwrap();

        let runner = BlastnRunner::new(binary.clone());
        assert!(!runner.is_available());

        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(runner.is_available());
    }
}
