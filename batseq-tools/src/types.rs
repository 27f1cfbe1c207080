//! Common types for tool integration

use serde::Serialize;

/// Everything a finished tool process left behind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Message describing a failed run: the tool's own stderr when it wrote
    /// any, otherwise the exit status
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr_text();
        if !stderr.is_empty() {
            return stderr;
        }
        match self.exit_code {
            Some(code) => format!("process exited with status {}", code),
            None => "process was terminated by a signal".to_string(),
        }
    }
}

/// Availability of the alignment executable
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub name: String,
    pub available: bool,
    pub version: Option<String>,
}

/// Presence of the reference database artifacts
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub name: String,
    pub available: bool,
    /// File names of the artifacts that are absent
    pub missing: Vec<String>,
}

/// Combined readiness report of a search service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub tool: ToolStatus,
    pub database: DatabaseStatus,
}

impl ServiceStatus {
    pub fn ready(&self) -> bool {
        self.tool.available && self.database.available
    }
}
