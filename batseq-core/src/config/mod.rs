//! Configuration types for BatSEQ

use crate::system::paths;
use crate::BatseqError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub blast: BlastConfig,
    #[serde(default)]
    pub staging: StagingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlastConfig {
    /// Path to the blastn executable (looked up on PATH when unset)
    #[serde(default)]
    pub binary: Option<String>,
    /// Base path of the reference database, without the .nhr/.nin/.nsq extension
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound for each of stdout and stderr
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
    #[serde(default)]
    pub num_threads: Option<usize>,
    #[serde(default)]
    pub max_target_seqs: Option<usize>,
    #[serde(default)]
    pub evalue: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StagingConfig {
    /// Directory for staged query files
    #[serde(default)]
    pub scratch_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

// Default value functions
fn default_timeout_secs() -> u64 { 300 }
fn default_max_output_bytes() -> usize { 10 * 1024 * 1024 }
fn default_bind() -> String { "127.0.0.1:5000".to_string() }

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            binary: None,
            database: None,
            timeout_secs: default_timeout_secs(),
            max_output_bytes: default_max_output_bytes(),
            num_threads: None,
            max_target_seqs: None,
            evalue: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl BlastConfig {
    /// Database base path, falling back to `$BATSEQ_DATABASES_DIR/mybatdb`
    pub fn database_base(&self) -> PathBuf {
        self.database
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(paths::default_database_base)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl StagingConfig {
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(paths::batseq_scratch_dir)
    }
}

impl Config {
    /// Reject values that would make every search fail
    pub fn validate(&self) -> Result<(), BatseqError> {
        if self.blast.timeout_secs == 0 {
            return Err(BatseqError::Configuration(
                "blast.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.blast.max_output_bytes == 0 {
            return Err(BatseqError::Configuration(
                "blast.max_output_bytes must be greater than zero".to_string(),
            ));
        }
        if let Some(evalue) = self.blast.evalue {
            if !evalue.is_finite() || evalue <= 0.0 {
                return Err(BatseqError::Configuration(format!(
                    "blast.evalue must be a positive number, got {}",
                    evalue
                )));
            }
        }
        if self.blast.num_threads == Some(0) {
            return Err(BatseqError::Configuration(
                "blast.num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, BatseqError> {
    let path = path.as_ref();
    tracing::debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| BatseqError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), BatseqError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| BatseqError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
