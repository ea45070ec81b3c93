//! Total amount extraction for receipts.
//!
//! The total is the largest amount found in a short window starting at the
//! first line that mentions a total-like keyword. This is an approximation:
//! an earlier "Amount Due" line wins over a later, more authoritative "Total",
//! and a window that also covers a larger unrelated figure reports that
//! figure instead.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::{AMOUNT_PATTERN, AMOUNT_WINDOW_TRAILING_LINES, TOTAL_KEYWORDS};
use super::{ExtractionMatch, FieldExtractor};

/// Total amount extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lines: Vec<&str> = text.lines().collect();

        lines.iter().enumerate().find_map(|(i, line)| {
            if !is_keyword_line(line) {
                return None;
            }

            let end = (i + 1 + AMOUNT_WINDOW_TRAILING_LINES).min(lines.len());
            let window = lines[i..end].join(" ");
            let best = max_amount(&window);

            trace!("Keyword line {} window {:?} -> {:?}", i, window, best);
            best.map(|(amount, source)| ExtractionMatch::new(amount, i, source))
        })
    }
}

fn is_keyword_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    TOTAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Largest amount in the window, with its matched text.
fn max_amount(window: &str) -> Option<(Decimal, &str)> {
    AMOUNT_PATTERN
        .find_iter(window)
        .filter_map(|m| Decimal::from_str(m.as_str()).ok().map(|d| (d, m.as_str())))
        .max_by(|a, b| a.0.cmp(&b.0))
}

/// Extract the receipt total, if any keyword window contains an amount.
pub fn extract_total(text: &str) -> Option<Decimal> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}
