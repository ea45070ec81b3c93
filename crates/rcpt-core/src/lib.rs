//! Core library for scanned receipt processing.
//!
//! This crate provides:
//! - Text sources for PDF text layers and OCR sidecar files
//! - Merchant, total amount and purchase date extraction from raw text
//! - Year-based filing of documents
//! - A JSON ledger of processed receipts

pub mod error;
pub mod ledger;
pub mod models;
pub mod organize;
pub mod pdf;
pub mod receipt;

pub use error::{RcptError, Result};
pub use ledger::{ReceiptFile, ReceiptLedger, ReceiptRecord};
pub use models::config::RcptConfig;
pub use models::merchant::{KnownMerchant, MerchantTable};
pub use models::receipt::{ExtractionResult, MerchantSource};
pub use organize::{filing_year, FilingYear, PurchaseDate, YearOrganizer, YearSource};
pub use pdf::{validate_pdf, PdfExtractor, PdfValidation, PlainTextSource, TextSource};
pub use receipt::{HeuristicReceiptParser, ParseOutcome, ReceiptParser};
