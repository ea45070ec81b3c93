//! Heuristic receipt parser combining the merchant, amount and date rules.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::models::merchant::MerchantTable;
use crate::models::receipt::ExtractionResult;

use super::rules::{merchant::resolve_merchant, AmountExtractor, DateExtractor, FieldExtractor};

/// Result of parsing one receipt.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Extracted fields.
    pub result: ExtractionResult,
    /// Raw text the fields were extracted from.
    pub raw_text: String,
    /// Notes about fields that could not be extracted.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse a receipt from text. Never fails: missing fields are `None`.
    fn parse(&self, text: &str) -> ParseOutcome;
}

/// Rule-based parser over a fixed merchant snapshot.
pub struct HeuristicReceiptParser {
    merchants: Arc<MerchantTable>,
}

impl HeuristicReceiptParser {
    /// Create a parser over the given merchant table.
    pub fn new(merchants: Arc<MerchantTable>) -> Self {
        Self { merchants }
    }

    /// Merchant table this parser resolves against.
    pub fn merchants(&self) -> &MerchantTable {
        &self.merchants
    }

    /// Extract the fields without timing or warnings.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let merchant = resolve_merchant(text, &self.merchants);
        let total = AmountExtractor::new().extract(text);
        let date = DateExtractor::new().extract(text);

        if let Some(m) = &merchant {
            debug!("Merchant {:?} ({:?})", m.name, m.source);
        }
        if let Some(t) = &total {
            debug!("Total {} from line {}", t.value, t.line);
        }
        if let Some(d) = &date {
            debug!("Purchase date {:?} from line {}", d.value, d.line);
        }

        let (merchant_name, category, merchant_source) = match merchant {
            Some(m) => (Some(m.name), m.category, Some(m.source)),
            None => (None, None, None),
        };

        ExtractionResult {
            merchant_name,
            total_amount: total.map(|t| t.value),
            purchased_at: date.map(|d| d.value),
            category,
            merchant_source,
        }
    }
}

impl Default for HeuristicReceiptParser {
    fn default() -> Self {
        Self::new(Arc::new(MerchantTable::default_seed()))
    }
}

impl ReceiptParser for HeuristicReceiptParser {
    fn parse(&self, text: &str) -> ParseOutcome {
        let start = Instant::now();

        info!("Parsing receipt from {} characters of text", text.len());

        let result = self.extract(text);
        let warnings: Vec<String> = result
            .missing_fields()
            .into_iter()
            .map(|field| match field {
                "merchant_name" => "Could not identify merchant".to_string(),
                "total_amount" => "Could not extract total amount".to_string(),
                "purchased_at" => "Could not extract purchase date".to_string(),
                other => format!("Could not extract {}", other),
            })
            .collect();

        debug!(
            "Extracted receipt with {} of 3 fields",
            3 - warnings.len()
        );

        ParseOutcome {
            result,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::merchant::KnownMerchant;
    use crate::models::receipt::MerchantSource;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_parse_basic_receipt() {
        let text = r#"
            WHOLE FOODS MARKET
            Store 10234
            03/15/2023 14:02

            Bananas        1.29
            Oat Milk       4.99
            Subtotal       6.28
            Tax            0.52
            Total          6.80
            VISA           6.80
        "#;

        let outcome = HeuristicReceiptParser::default().parse(text);

        assert_eq!(
            outcome.result,
            ExtractionResult {
                merchant_name: Some("Whole Foods Market".to_string()),
                total_amount: Some(Decimal::from_str("6.80").unwrap()),
                purchased_at: Some("03/15/2023".to_string()),
                category: Some("Grocery".to_string()),
                merchant_source: Some(MerchantSource::Known),
            }
        );
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.raw_text, text);
    }

    #[test]
    fn test_unrecognizable_text_yields_empty_result() {
        let outcome = HeuristicReceiptParser::default().parse("1234\n#!\n42");

        assert!(outcome.result.is_empty());
        assert_eq!(outcome.warnings.len(), 3);
    }

    #[test]
    fn test_empty_text() {
        let outcome = HeuristicReceiptParser::default().parse("");
        assert_eq!(outcome.result, ExtractionResult::default());
    }

    #[test]
    fn test_custom_table_snapshot() {
        let table = MerchantTable::new([KnownMerchant::new("blue bottle", "Blue Bottle Coffee", Some("Cafe"))])
            .unwrap();
        let parser = HeuristicReceiptParser::new(Arc::new(table));

        let result = parser.extract("BLUE BOTTLE #12\nAmount 5.25");
        assert_eq!(result.merchant_name.as_deref(), Some("Blue Bottle Coffee"));
        assert_eq!(result.category.as_deref(), Some("Cafe"));
        assert_eq!(result.total_amount, Some(Decimal::from_str("5.25").unwrap()));
        assert_eq!(result.purchased_at, None);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let parser = HeuristicReceiptParser::default();
        let text = "Joe's Diner\n15 March 2023\nBalance 18.40";

        assert_eq!(parser.extract(text), parser.extract(text));
        assert_eq!(parser.extract(text).merchant_name.as_deref(), Some("Joe'S Diner"));
    }
}
