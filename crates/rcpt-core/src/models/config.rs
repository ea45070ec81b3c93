//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::merchant::{KnownMerchant, MerchantTable};
use crate::error::MerchantError;

/// Main configuration for the rcpt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Where documents and the ledger live.
    pub storage: StorageConfig,

    /// PDF and text intake configuration.
    pub pdf: PdfConfig,

    /// Known merchants in priority order (empty = built-in seed).
    pub merchants: Vec<KnownMerchant>,
}

/// Storage locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory; documents are filed under `<upload_dir>/<year>`.
    pub upload_dir: PathBuf,

    /// Receipt ledger file.
    pub ledger_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            ledger_file: PathBuf::from("receipts.json"),
        }
    }
}

/// Document intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted text length to attempt parsing.
    pub min_text_length: usize,

    /// File extensions accepted by `process` and `batch`.
    pub allowed_extensions: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            allowed_extensions: vec!["pdf".to_string(), "txt".to_string()],
        }
    }
}

impl PdfConfig {
    /// Case-insensitive extension check.
    pub fn is_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Build the merchant snapshot for this configuration.
    pub fn merchant_table(&self) -> Result<MerchantTable, MerchantError> {
        if self.merchants.is_empty() {
            Ok(MerchantTable::default_seed())
        } else {
            MerchantTable::new(self.merchants.iter().cloned())
        }
    }
}
