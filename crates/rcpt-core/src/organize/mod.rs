//! Year-based filing of receipt documents.
//!
//! Documents are stored under `<base_dir>/<year>`, where the year comes from
//! the extracted purchase date. Anything that cannot be turned into a year
//! falls back to the current calendar year.

mod year;

pub use year::{filing_year, filing_year_at, FilingYear, PurchaseDate, YearSource};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::OrganizeError;

/// Result type for organize operations.
pub type Result<T> = std::result::Result<T, OrganizeError>;

/// Computes and creates year directories under a base directory.
#[derive(Debug, Clone)]
pub struct YearOrganizer {
    base_dir: PathBuf,
}

impl YearOrganizer {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory for `year`, created if absent.
    pub fn target_path(&self, year: i32) -> Result<PathBuf> {
        let path = self.base_dir.join(year.to_string());
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Move `path` into the directory for `year` and return its new location.
    ///
    /// Files already in that directory are left in place.
    pub fn file_document(&self, path: &Path, year: i32) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| OrganizeError::NotAFile(path.to_path_buf()))?;
        let target_dir = self.target_path(year)?;
        let destination = target_dir.join(file_name);

        if path.parent() == Some(target_dir.as_path()) || same_file(path, &destination) {
            debug!("{} already filed under {}", path.display(), year);
            return Ok(path.to_path_buf());
        }

        if destination.exists() {
            return Err(OrganizeError::Conflict(destination));
        }

        fs::rename(path, &destination)?;
        info!("Filed {} -> {}", path.display(), destination.display());
        Ok(destination)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_target_path_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let organizer = YearOrganizer::new(dir.path());

        let first = organizer.target_path(2023).unwrap();
        let second = organizer.target_path(2023).unwrap();

        assert_eq!(first, dir.path().join("2023"));
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_file_document_moves_into_year() {
        let dir = TempDir::new().unwrap();
        let organizer = YearOrganizer::new(dir.path());
        let inbox = organizer.target_path(2026).unwrap();
        let source = inbox.join("receipt.pdf");
        fs::write(&source, b"%PDF").unwrap();

        let filed = organizer.file_document(&source, 2023).unwrap();

        assert_eq!(filed, dir.path().join("2023").join("receipt.pdf"));
        assert!(filed.exists());
        assert!(!source.exists());
    }

    #[test]
    fn test_file_document_same_directory_is_noop() {
        let dir = TempDir::new().unwrap();
        let organizer = YearOrganizer::new(dir.path());
        let source = organizer.target_path(2023).unwrap().join("receipt.pdf");
        fs::write(&source, b"%PDF").unwrap();

        let filed = organizer.file_document(&source, 2023).unwrap();

        assert_eq!(filed, source);
        assert!(source.exists());
    }

    #[test]
    fn test_file_document_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let organizer = YearOrganizer::new(dir.path());
        let existing = organizer.target_path(2023).unwrap().join("receipt.pdf");
        fs::write(&existing, b"old").unwrap();
        let source = organizer.target_path(2026).unwrap().join("receipt.pdf");
        fs::write(&source, b"new").unwrap();

        let err = organizer.file_document(&source, 2023).unwrap_err();

        assert!(matches!(err, OrganizeError::Conflict(p) if p == existing));
        assert_eq!(fs::read(&existing).unwrap(), b"old");
        assert!(source.exists());
    }
}
