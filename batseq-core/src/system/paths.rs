use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static BATSEQ_HOME: OnceLock<PathBuf> = OnceLock::new();
static BATSEQ_DATABASES_DIR: OnceLock<PathBuf> = OnceLock::new();
static BATSEQ_SCRATCH_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Name of the reference database the lab builds with makeblastdb
pub const DEFAULT_DATABASE_NAME: &str = "mybatdb";

/// Get the BatSEQ home directory
/// Checks BATSEQ_HOME environment variable, falls back to ${HOME}/.batseq
pub fn batseq_home() -> PathBuf {
    BATSEQ_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("BATSEQ_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".batseq")
            }
        })
        .clone()
}

/// Get the reference database directory
/// Checks BATSEQ_DATABASES_DIR environment variable, falls back to BATSEQ_HOME/databases
pub fn batseq_databases_dir() -> PathBuf {
    BATSEQ_DATABASES_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("BATSEQ_DATABASES_DIR") {
                PathBuf::from(path)
            } else {
                batseq_home().join("databases")
            }
        })
        .clone()
}

/// Get the scratch directory for staged query files
/// Checks BATSEQ_SCRATCH_DIR environment variable, falls back to $TMPDIR/batseq or /tmp/batseq
pub fn batseq_scratch_dir() -> PathBuf {
    BATSEQ_SCRATCH_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("BATSEQ_SCRATCH_DIR") {
                PathBuf::from(path)
            } else if let Ok(tmpdir) = std::env::var("TMPDIR") {
                PathBuf::from(tmpdir).join("batseq")
            } else {
                PathBuf::from("/tmp/batseq")
            }
        })
        .clone()
}

/// Base path of the default reference database
/// Returns: BATSEQ_DATABASES_DIR/mybatdb
pub fn default_database_base() -> PathBuf {
    batseq_databases_dir().join(DEFAULT_DATABASE_NAME)
}

/// Check if running with a custom home or database directory
pub fn is_custom_data_dir() -> bool {
    std::env::var("BATSEQ_HOME").is_ok() || std::env::var("BATSEQ_DATABASES_DIR").is_ok()
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "BatSEQ Paths:\n  \
        Home: {}\n  \
        Databases: {}\n  \
        Scratch: {}\n  \
        Custom: {}",
        batseq_home().display(),
        batseq_databases_dir().display(),
        batseq_scratch_dir().display(),
        if is_custom_data_dir() {
            "Yes"
        } else {
            "No (using defaults)"
        }
    )
}
