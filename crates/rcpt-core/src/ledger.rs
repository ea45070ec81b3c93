//! JSON-file ledger of uploaded documents and the receipts extracted from them.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::LedgerError;
use crate::models::receipt::ExtractionResult;
use crate::pdf::PdfValidation;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptFile {
    pub id: u64,
    pub file_name: String,
    pub file_path: PathBuf,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
    pub is_processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A receipt extracted from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub id: u64,
    pub file_id: u64,
    pub purchased_at: Option<String>,
    pub merchant_name: Option<String>,
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub file_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerData {
    next_file_id: u64,
    next_receipt_id: u64,
    files: Vec<ReceiptFile>,
    receipts: Vec<ReceiptRecord>,
}

/// Receipt ledger backed by a single JSON document.
#[derive(Debug)]
pub struct ReceiptLedger {
    path: PathBuf,
    data: LedgerData,
}

impl ReceiptLedger {
    /// Open the ledger at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            LedgerData::default()
        };

        debug!(
            "Opened ledger {} ({} files, {} receipts)",
            path.display(),
            data.files.len(),
            data.receipts.len()
        );
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the ledger through a temporary file in the same directory.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(&self.data)?.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Register an uploaded document; it starts unvalidated and unprocessed.
    pub fn register_file(&mut self, file_path: &Path) -> &ReceiptFile {
        self.data.next_file_id += 1;
        let now = Utc::now();
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.data.files.push(ReceiptFile {
            id: self.data.next_file_id,
            file_name,
            file_path: file_path.to_path_buf(),
            is_valid: false,
            invalid_reason: None,
            is_processed: false,
            created_at: now,
            updated_at: now,
        });
        &self.data.files[self.data.files.len() - 1]
    }

    /// Store a validation outcome.
    pub fn mark_validated(&mut self, file_id: u64, validation: &PdfValidation) -> Result<&ReceiptFile> {
        let file = self.file_mut(file_id)?;
        file.is_valid = validation.is_valid;
        file.invalid_reason = validation.invalid_reason.clone();
        file.updated_at = Utc::now();
        Ok(file)
    }

    /// Record the receipt extracted from a valid file, which may have moved.
    pub fn record_receipt(
        &mut self,
        file_id: u64,
        result: &ExtractionResult,
        final_path: &Path,
    ) -> Result<&ReceiptRecord> {
        let file = self.file_mut(file_id)?;
        if !file.is_valid {
            return Err(LedgerError::InvalidFile(file_id));
        }

        let now = Utc::now();
        file.file_path = final_path.to_path_buf();
        file.is_processed = true;
        file.updated_at = now;

        self.data.next_receipt_id += 1;
        self.data.receipts.push(ReceiptRecord {
            id: self.data.next_receipt_id,
            file_id,
            purchased_at: result.purchased_at.clone(),
            merchant_name: result.merchant_name.clone(),
            total_amount: result.total_amount,
            category: result.category.clone(),
            file_path: final_path.to_path_buf(),
            created_at: now,
        });
        Ok(&self.data.receipts[self.data.receipts.len() - 1])
    }

    pub fn files(&self) -> &[ReceiptFile] {
        &self.data.files
    }

    pub fn file(&self, file_id: u64) -> Result<&ReceiptFile> {
        self.data
            .files
            .iter()
            .find(|f| f.id == file_id)
            .ok_or(LedgerError::FileNotFound(file_id))
    }

    /// Receipts, newest first.
    pub fn receipts(&self) -> Vec<&ReceiptRecord> {
        let mut receipts: Vec<_> = self.data.receipts.iter().collect();
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        receipts
    }

    pub fn receipt(&self, receipt_id: u64) -> Result<&ReceiptRecord> {
        self.data
            .receipts
            .iter()
            .find(|r| r.id == receipt_id)
            .ok_or(LedgerError::ReceiptNotFound(receipt_id))
    }

    fn file_mut(&mut self, file_id: u64) -> Result<&mut ReceiptFile> {
        self.data
            .files
            .iter_mut()
            .find(|f| f.id == file_id)
            .ok_or(LedgerError::FileNotFound(file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn valid() -> PdfValidation {
        PdfValidation {
            is_valid: true,
            page_count: 1,
            invalid_reason: None,
        }
    }

    fn sample_result() -> ExtractionResult {
        ExtractionResult {
            merchant_name: Some("Target".to_string()),
            total_amount: Some(Decimal::from_str("19.99").unwrap()),
            purchased_at: Some("01/02/2024".to_string()),
            category: Some("Retail".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_validate_record() {
        let dir = TempDir::new().unwrap();
        let mut ledger = ReceiptLedger::open(dir.path().join("receipts.json")).unwrap();

        let file_id = ledger.register_file(Path::new("uploads/2026/a.pdf")).id;
        assert_eq!(file_id, 1);
        assert_eq!(ledger.file(file_id).unwrap().file_name, "a.pdf");

        ledger.mark_validated(file_id, &valid()).unwrap();
        let receipt = ledger
            .record_receipt(file_id, &sample_result(), Path::new("uploads/2024/a.pdf"))
            .unwrap();
        assert_eq!(receipt.id, 1);
        assert_eq!(receipt.merchant_name.as_deref(), Some("Target"));

        let file = ledger.file(file_id).unwrap();
        assert!(file.is_processed);
        assert_eq!(file.file_path, PathBuf::from("uploads/2024/a.pdf"));
    }

    #[test]
    fn test_invalid_file_cannot_be_recorded() {
        let dir = TempDir::new().unwrap();
        let mut ledger = ReceiptLedger::open(dir.path().join("receipts.json")).unwrap();
        let file_id = ledger.register_file(Path::new("bad.pdf")).id;

        let rejected = PdfValidation {
            is_valid: false,
            page_count: 0,
            invalid_reason: Some("PDF has no pages".to_string()),
        };
        ledger.mark_validated(file_id, &rejected).unwrap();

        let err = ledger
            .record_receipt(file_id, &ExtractionResult::default(), Path::new("bad.pdf"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidFile(1)));
        assert_eq!(
            ledger.file(file_id).unwrap().invalid_reason.as_deref(),
            Some("PDF has no pages")
        );
    }

    #[test]
    fn test_unknown_ids() {
        let dir = TempDir::new().unwrap();
        let mut ledger = ReceiptLedger::open(dir.path().join("receipts.json")).unwrap();

        assert!(matches!(ledger.file(9), Err(LedgerError::FileNotFound(9))));
        assert!(matches!(ledger.receipt(9), Err(LedgerError::ReceiptNotFound(9))));
        assert!(matches!(
            ledger.mark_validated(9, &valid()),
            Err(LedgerError::FileNotFound(9))
        ));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("receipts.json");

        {
            let mut ledger = ReceiptLedger::open(&path).unwrap();
            for name in ["a.pdf", "b.pdf"] {
                let id = ledger.register_file(Path::new(name)).id;
                ledger.mark_validated(id, &valid()).unwrap();
                ledger.record_receipt(id, &sample_result(), Path::new(name)).unwrap();
            }
            ledger.save().unwrap();
        }

        let mut reopened = ReceiptLedger::open(&path).unwrap();
        assert_eq!(reopened.files().len(), 2);
        let ids: Vec<u64> = reopened.receipts().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);

        // Ids keep increasing after reopen
        assert_eq!(reopened.register_file(Path::new("c.pdf")).id, 3);
    }

    #[test]
    fn test_corrupt_ledger() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("receipts.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(ReceiptLedger::open(&path), Err(LedgerError::Serde(_))));
    }
}
