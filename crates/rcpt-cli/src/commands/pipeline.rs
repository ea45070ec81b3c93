//! Per-document pipeline shared by `process` and `batch`.
//!
//! validate -> extract text -> parse -> file by year -> record in ledger

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use rcpt_core::organize::filing_year;
use rcpt_core::pdf::{PdfValidation, PlainTextSource, TextSource};
use rcpt_core::{
    validate_pdf, FilingYear, HeuristicReceiptParser, PdfExtractor, PurchaseDate, RcptConfig,
    ReceiptLedger, ReceiptParser, YearOrganizer,
};

/// Kind of input document, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF with a text layer.
    Pdf,
    /// Plain text produced by an external OCR engine.
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path, config: &RcptConfig) -> anyhow::Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if !config.pdf.is_allowed(&extension) {
            anyhow::bail!("Unsupported file format: {}", extension);
        }

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Text),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }
}

/// Everything reported about one processed document.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptReport {
    pub receipt_id: u64,
    pub file_id: u64,
    pub merchant_name: Option<String>,
    pub total_amount: Option<Decimal>,
    pub purchased_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub filing_year: FilingYear,
    pub file_path: PathBuf,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    pub processing_time_ms: u64,
}

/// Options controlling a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Move the document into its year directory.
    pub file_documents: bool,
    /// Include the extracted text in the report.
    pub include_raw_text: bool,
}

/// Pipeline state shared across documents.
pub struct Pipeline<'a> {
    config: &'a RcptConfig,
    parser: HeuristicReceiptParser,
    organizer: YearOrganizer,
    ledger: ReceiptLedger,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RcptConfig, options: PipelineOptions) -> anyhow::Result<Self> {
        let merchants = config.merchant_table()?;
        debug!("Using {} known merchants", merchants.len());

        Ok(Self {
            config,
            parser: HeuristicReceiptParser::new(merchants.into()),
            organizer: YearOrganizer::new(&config.storage.upload_dir),
            ledger: ReceiptLedger::open(&config.storage.ledger_file)?,
            options,
        })
    }

    /// Run one document through the pipeline and persist the ledger.
    pub fn process(&mut self, path: &Path) -> anyhow::Result<ReceiptReport> {
        let result = self.process_inner(path);
        self.ledger.save()?;
        result
    }

    fn process_inner(&mut self, path: &Path) -> anyhow::Result<ReceiptReport> {
        if !path.is_file() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        let kind = DocumentKind::from_path(path, self.config)?;

        info!("Processing file: {}", path.display());
        let data = fs::read(path)?;
        let file_id = self.ledger.register_file(path).id;

        let validation = match kind {
            DocumentKind::Pdf => validate_pdf(&data),
            DocumentKind::Text => PdfValidation {
                is_valid: true,
                page_count: 1,
                invalid_reason: None,
            },
        };
        self.ledger.mark_validated(file_id, &validation)?;
        if !validation.is_valid {
            anyhow::bail!(
                "File is not valid: {}",
                validation.invalid_reason.as_deref().unwrap_or("unknown reason")
            );
        }

        let text = match kind {
            DocumentKind::Pdf => PdfExtractor::new().extract_text(&data)?,
            DocumentKind::Text => PlainTextSource.extract_text(&data)?,
        };
        if text.trim().len() < self.config.pdf.min_text_length {
            warn!("Little or no text extracted from {}", path.display());
        }

        let outcome = self.parser.parse(&text);
        for warning in &outcome.warnings {
            debug!("{}: {}", path.display(), warning);
        }

        let purchase_date = outcome.result.purchased_at.as_deref().map(PurchaseDate::from);
        let year = filing_year(purchase_date.as_ref());

        let final_path = if self.options.file_documents {
            self.organizer.file_document(path, year.year)?
        } else {
            path.to_path_buf()
        };

        let receipt_id = self
            .ledger
            .record_receipt(file_id, &outcome.result, &final_path)?
            .id;

        let result = outcome.result;
        Ok(ReceiptReport {
            receipt_id,
            file_id,
            merchant_name: result.merchant_name,
            total_amount: result.total_amount,
            purchased_at: result.purchased_at,
            category: result.category,
            filing_year: year,
            file_path: final_path,
            warnings: outcome.warnings,
            raw_text: self.options.include_raw_text.then_some(outcome.raw_text),
            processing_time_ms: outcome.processing_time_ms,
        })
    }
}

pub const CSV_HEADER: [&str; 8] = [
    "receipt_id",
    "merchant_name",
    "total_amount",
    "purchased_at",
    "category",
    "filing_year",
    "file_path",
    "warnings",
];

/// One CSV row for a report, matching `CSV_HEADER`.
pub fn csv_row(report: &ReceiptReport) -> [String; 8] {
    [
        report.receipt_id.to_string(),
        report.merchant_name.clone().unwrap_or_default(),
        report.total_amount.map(|a| a.to_string()).unwrap_or_default(),
        report.purchased_at.clone().unwrap_or_default(),
        report.category.clone().unwrap_or_default(),
        report.filing_year.year.to_string(),
        report.file_path.display().to_string(),
        report.warnings.join("; "),
    ]
}

/// Human-readable summary of a report.
pub fn format_text(report: &ReceiptReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Receipt #{}\n", report.receipt_id));
    output.push_str(&format!(
        "Merchant: {}\n",
        report.merchant_name.as_deref().unwrap_or("-")
    ));
    if let Some(category) = &report.category {
        output.push_str(&format!("Category: {}\n", category));
    }
    output.push_str(&format!(
        "Total:    {}\n",
        report.total_amount.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "Date:     {}\n",
        report.purchased_at.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("Filed:    {}\n", report.file_path.display()));

    for warning in &report.warnings {
        output.push_str(&format!("  ! {}\n", warning));
    }

    output
}
