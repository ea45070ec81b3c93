//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Known-merchant table error.
    #[error("merchant table error: {0}")]
    Merchant(#[from] MerchantError),

    /// Filing error.
    #[error("organize error: {0}")]
    Organize(#[from] OrganizeError),

    /// Receipt ledger error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while building a known-merchant table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MerchantError {
    /// Two entries share the same search pattern.
    #[error("duplicate search pattern: {0}")]
    DuplicatePattern(String),

    /// A pattern is empty after trimming.
    #[error("empty search pattern for {0}")]
    EmptyPattern(String),
}

/// Errors raised while moving documents into their filing directory.
#[derive(Error, Debug)]
pub enum OrganizeError {
    /// A different file already occupies the destination.
    #[error("destination already exists: {0}")]
    Conflict(std::path::PathBuf),

    /// The source path has no file name component.
    #[error("not a file path: {0}")]
    NotAFile(std::path::PathBuf),

    /// Directory creation or rename failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors related to the receipt ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// No registered file with this id.
    #[error("file not found: {0}")]
    FileNotFound(u64),

    /// No receipt with this id.
    #[error("receipt not found: {0}")]
    ReceiptNotFound(u64),

    /// The file has not passed validation.
    #[error("file {0} is not valid")]
    InvalidFile(u64),

    /// The ledger document could not be decoded or encoded.
    #[error("corrupt ledger: {0}")]
    Serde(#[from] serde_json::Error),

    /// Reading or writing the ledger failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
