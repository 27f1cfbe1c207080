//! Reference database checks

use crate::types::DatabaseStatus;
use batseq_core::{BatseqError, BatseqResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Files `makeblastdb` produces for a nucleotide database
pub const REQUIRED_EXTENSIONS: [&str; 3] = ["nhr", "nin", "nsq"];

/// A pre-built nucleotide database identified by its base path
/// (e.g. `data/mybatdb` for `data/mybatdb.nhr`, `.nin`, `.nsq`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDatabase {
    base: PathBuf,
}

impl ReferenceDatabase {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn name(&self) -> String {
        self.base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.base.display().to_string())
    }

    /// `<base>.<extension>`, appended rather than replacing any dot in the name
    pub fn artifact_path(&self, extension: &str) -> PathBuf {
        let mut path: OsString = self.base.clone().into_os_string();
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }

    pub fn artifacts(&self) -> Vec<PathBuf> {
        REQUIRED_EXTENSIONS
            .iter()
            .map(|ext| self.artifact_path(ext))
            .collect()
    }

    pub fn missing_artifacts(&self) -> Vec<PathBuf> {
        self.artifacts()
            .into_iter()
            .filter(|p| !p.is_file())
            .collect()
    }

    /// Fail on the first missing artifact. The error carries only the file
    /// name; the full path is logged.
    pub fn verify(&self) -> BatseqResult<()> {
        if let Some(missing) = self.missing_artifacts().into_iter().next() {
            tracing::error!("Database file not found: {}", missing.display());
            return Err(BatseqError::DatabaseUnavailable {
                artifact: file_name(&missing),
            });
        }
        Ok(())
    }

    pub fn status(&self) -> DatabaseStatus {
        let missing: Vec<String> = self
            .missing_artifacts()
            .iter()
            .map(|p| file_name(p))
            .collect();
        DatabaseStatus {
            name: self.name(),
            available: missing.is_empty(),
            missing,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build(dir: &Path, extensions: &[&str]) -> ReferenceDatabase {
        let db = ReferenceDatabase::new(dir.join("mybatdb"));
        for ext in extensions {
            std::fs::write(db.artifact_path(ext), b"").unwrap();
        }
        db
    }

    #[test]
    fn test_artifact_paths() {
        let db = ReferenceDatabase::new("data/mybatdb");
        assert_eq!(db.name(), "mybatdb");
        assert_eq!(
            db.artifacts(),
            vec![
                PathBuf::from("data/mybatdb.nhr"),
                PathBuf::from("data/mybatdb.nin"),
                PathBuf::from("data/mybatdb.nsq"),
            ]
        );
    }

    #[test]
    fn test_dotted_base_name_is_kept() {
        let db = ReferenceDatabase::new("data/bats.v2");
        assert_eq!(db.artifact_path("nsq"), PathBuf::from("data/bats.v2.nsq"));
    }

    #[test]
    fn test_complete_database_verifies() {
        let dir = TempDir::new().unwrap();
        let db = build(dir.path(), &REQUIRED_EXTENSIONS);
        assert!(db.verify().is_ok());

        let status = db.status();
        assert!(status.available);
        assert!(status.missing.is_empty());
    }

    #[test]
    fn test_first_missing_artifact_reported() {
        let dir = TempDir::new().unwrap();
        let db = build(dir.path(), &["nhr"]);

        match db.verify() {
            Err(BatseqError::DatabaseUnavailable { artifact }) => {
                assert_eq!(artifact, "mybatdb.nin")
            }
            other => panic!("Expected DatabaseUnavailable, got {:?}", other),
        }

        let status = db.status();
        assert!(!status.available);
        assert_eq!(status.missing, vec!["mybatdb.nin", "mybatdb.nsq"]);
    }

    #[test]
    fn test_directory_is_not_an_artifact() {
        let dir = TempDir::new().unwrap();
        let db = build(dir.path(), &["nhr", "nin"]);
        std::fs::create_dir(db.artifact_path("nsq")).unwrap();
        assert!(db.verify().is_err());
    }
}
