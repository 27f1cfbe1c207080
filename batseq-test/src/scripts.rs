//! Fake `blastn` executables for process-level tests
//!
//! Each script answers `-version`, records its arguments to `<name>.args`
//! and a copy of the query to `<name>.query` next to itself, and fails with
//! status 2 when the `-query` file does not exist. Unix only.

use crate::environment::TestEnvironment;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const FAKE_VERSION: &str = "blastn: 2.15.0+";

/// What the fake tool does after its common preamble
#[derive(Debug, Clone)]
pub enum FakeBlastn {
    /// Print the report on stdout and exit 0
    Report(String),
    /// Print the report and a warning on stderr, exit 0
    ReportWithWarning { report: String, warning: String },
    /// One row naming the query record, so concurrent callers can tell
    /// their results apart
    EchoQuery,
    /// Write `stderr` and exit with `code`
    Fail { stderr: String, code: i32 },
    /// Never finish on its own
    Hang,
    /// Write `bytes` bytes to stdout
    Flood { bytes: usize },
}

impl FakeBlastn {
    fn body(&self, data_dir: &Path, name: &str) -> Result<String> {
        Ok(match self {
            FakeBlastn::Report(report) => {
                let report_path = data_dir.join(format!("{}.report", name));
                std::fs::write(&report_path, report)?;
                format!("cat '{}'\nexit 0\n", report_path.display())
            }
            FakeBlastn::ReportWithWarning { report, warning } => {
                let report_path = data_dir.join(format!("{}.report", name));
                std::fs::write(&report_path, report)?;
                format!(
                    "cat '{}'\necho '{}' >&2\nexit 0\n",
                    report_path.display(),
                    warning
                )
            }
            FakeBlastn::EchoQuery => concat!(
                "id=$(sed -n 's/^>\\([^ ]*\\).*/\\1/p' \"$query\" | head -n 1)\n",
                "printf '%s\\tEcho %s\\t100.0\\t12\\t0\\t0\\t1\\t12\\t1\\t12\\t1e-5\\t24.3\\n' \"$id\" \"$id\"\n",
                "exit 0\n"
            )
            .to_string(),
            FakeBlastn::Fail { stderr, code } => {
                format!("echo '{}' >&2\nexit {}\n", stderr, code)
            }
            FakeBlastn::Hang => "exec sleep 30\n".to_string(),
            FakeBlastn::Flood { bytes } => {
                format!("head -c {} /dev/zero | tr '\\0' 'A'\nexit 0\n", bytes)
            }
        })
    }
}

fn preamble(args_file: &Path, query_copy: &Path) -> String {
    format!(
        r#"#!/bin/sh
# Fake blastn for testing
if [ "$1" = "-version" ]; then
    echo "{version}"
    echo "Package: blast 2.15.0, build Jan 01 2024 00:00:00"
    exit 0
fi
printf '%s\n' "$@" > '{args}'
query=""
while [ "$#" -gt 0 ]; do
    case "$1" in
        -query) shift; query="$1"; shift ;;
        *) shift ;;
    esac
done
if [ ! -f "$query" ]; then
    echo "BLAST query/options error: Query file $query not found" >&2
    exit 2
fi
cp "$query" '{copy}'
"#,
        version = FAKE_VERSION,
        args = args_file.display(),
        copy = query_copy.display(),
    )
}

/// Paths of an installed fake tool and what it recorded
#[derive(Debug, Clone)]
pub struct FakeTool {
    pub binary: PathBuf,
    pub args_file: PathBuf,
    pub query_copy: PathBuf,
}

impl FakeTool {
    /// Arguments of the most recent search invocation
    pub fn recorded_args(&self) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(&self.args_file)
            .with_context(|| format!("{} was never invoked", self.binary.display()))?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Query file contents seen by the most recent invocation
    pub fn recorded_query(&self) -> Result<String> {
        std::fs::read_to_string(&self.query_copy)
            .with_context(|| format!("{} never saw a query", self.binary.display()))
    }
}

impl TestEnvironment {
    /// Install a fake tool under `bin/<name>`
    #[cfg(unix)]
    pub fn create_fake_blastn(&self, name: &str, behavior: FakeBlastn) -> Result<FakeTool> {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.bin_dir();
        let tool = FakeTool {
            binary: bin.join(name),
            args_file: bin.join(format!("{}.args", name)),
            query_copy: bin.join(format!("{}.query", name)),
        };

        let script = format!(
            "{}{}",
            preamble(&tool.args_file, &tool.query_copy),
            behavior.body(&bin, name)?
        );
        std::fs::write(&tool.binary, script)
            .with_context(|| format!("Failed to write {}", tool.binary.display()))?;

        let mut perms = std::fs::metadata(&tool.binary)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&tool.binary, perms)?;

        Ok(tool)
    }
}
