//! Test environment management
//!
//! Provides isolated test environments with automatic cleanup using RAII.

use anyhow::{Context, Result};
use batseq_core::system::paths::DEFAULT_DATABASE_NAME;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Artifacts makeblastdb writes for a nucleotide database
const DATABASE_EXTENSIONS: [&str; 3] = ["nhr", "nin", "nsq"];

/// Configuration for test environment
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Export BATSEQ_HOME, BATSEQ_DATABASES_DIR and BATSEQ_SCRATCH_DIR for the
    /// lifetime of the environment. Tests using this must be `#[serial]`.
    pub export_env: bool,
    /// Custom prefix for test directories
    pub prefix: Option<String>,
    /// Keep the directory after drop (for debugging)
    pub preserve: bool,
}

/// Isolated test environment with automatic cleanup.
///
/// Layout: `databases/` for reference databases, `scratch/` for staged
/// queries and `bin/` for fake tool executables.
pub struct TestEnvironment {
    temp_dir: Option<TempDir>,
    root_path: PathBuf,
    saved_env: HashMap<String, Option<String>>,
    config: TestConfig,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Self::with_config(TestConfig::default())
    }

    pub fn with_config(config: TestConfig) -> Result<Self> {
        let prefix = config.prefix.as_deref().unwrap_or("batseq-test");
        let temp_dir =
            TempDir::with_prefix(prefix).context("Failed to create temporary directory")?;

        let root_path = temp_dir.path().to_path_buf();

        std::fs::create_dir_all(root_path.join("databases"))?;
        std::fs::create_dir_all(root_path.join("scratch"))?;
        std::fs::create_dir_all(root_path.join("bin"))?;

        let mut env = Self {
            temp_dir: Some(temp_dir),
            root_path,
            saved_env: HashMap::new(),
            config,
        };

        if env.config.export_env {
            env.setup_environment();
        }

        Ok(env)
    }

    fn setup_environment(&mut self) {
        let vars = [
            ("BATSEQ_HOME", self.root_path.clone()),
            ("BATSEQ_DATABASES_DIR", self.databases_dir()),
            ("BATSEQ_SCRATCH_DIR", self.scratch_dir()),
        ];

        for (key, value) in vars {
            self.saved_env
                .insert(key.to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    pub fn databases_dir(&self) -> PathBuf {
        self.root_path.join("databases")
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.root_path.join("scratch")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root_path.join("bin")
    }

    /// Base path of the default database (`databases/mybatdb`)
    pub fn database_base(&self) -> PathBuf {
        self.databases_dir().join(DEFAULT_DATABASE_NAME)
    }

    /// Create empty `.nhr`, `.nin` and `.nsq` files for the default database
    pub fn create_database(&self) -> Result<PathBuf> {
        self.create_named_database(DEFAULT_DATABASE_NAME)
    }

    pub fn create_named_database(&self, name: &str) -> Result<PathBuf> {
        let base = self.databases_dir().join(name);
        for ext in DATABASE_EXTENSIONS {
            let path = artifact(&base, ext);
            std::fs::write(&path, b"")
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(base)
    }

    /// Delete one artifact of the default database
    pub fn remove_artifact(&self, extension: &str) -> Result<()> {
        let path = artifact(&self.database_base(), extension);
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        Ok(())
    }

    /// Files currently in the scratch directory
    pub fn staged_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.scratch_dir()) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Write a file in the test environment
    pub fn write_file(&self, path: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.root_path.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Read a file from the test environment
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let full_path = self.root_path.join(path);
        std::fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read {}", full_path.display()))
    }

    /// Keep the directory on disk (for debugging)
    pub fn preserve(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            let path = temp_dir.keep();
            println!("Test environment preserved at: {}", path.display());
        }
    }
}

fn artifact(base: &Path, extension: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        for (key, value) in &self.saved_env {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }

        if self.config.preserve {
            self.preserve();
        }
        // Otherwise temp_dir is removed when dropped
    }
}
