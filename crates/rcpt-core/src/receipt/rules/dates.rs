//! Purchase date extraction for receipts.

use tracing::trace;

use super::patterns::DATE_PATTERNS;
use super::{ExtractionMatch, FieldExtractor};

/// Purchase date extractor.
///
/// Returns the literal matched token. No calendar validation is done, so
/// "13/45/9999" is accepted as-is; consumers reparse the token themselves.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        text.lines().enumerate().find_map(|(i, line)| {
            DATE_PATTERNS.iter().find_map(|pattern| {
                pattern.find(line).map(|m| {
                    trace!("Date pattern {} matched {:?} on line {}", pattern.as_str(), m.as_str(), i);
                    ExtractionMatch::new(m.as_str().to_string(), i, line.trim())
                })
            })
        })
    }
}

/// Extract the first date token in the text.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_date() {
        assert_eq!(
            extract_date("Purchase Date: 03/15/2023"),
            Some("03/15/2023".to_string())
        );
    }

    #[test]
    fn test_hyphen_date() {
        assert_eq!(extract_date("15-03-2023"), Some("15-03-2023".to_string()));
    }

    #[test]
    fn test_long_date() {
        assert_eq!(extract_date("15 March 2023"), Some("15 March 2023".to_string()));
    }

    #[test]
    fn test_short_years() {
        assert_eq!(extract_date("3/5/23 10:42"), Some("3/5/23".to_string()));
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(extract_date("Ref 13/45/9999"), Some("13/45/9999".to_string()));
    }

    #[test]
    fn test_earlier_line_beats_higher_priority_pattern() {
        let text = "Visited 15 March 2023\nPrinted 03/16/2023";
        let result = DateExtractor::new().extract(text).unwrap();

        assert_eq!(result.value, "15 March 2023");
        assert_eq!(result.line, 0);
    }

    #[test]
    fn test_pattern_priority_within_line() {
        // Hyphen date appears first in the line, but slash pattern is tried first
        let text = "15-03-2023 reprinted 03/16/2023";
        assert_eq!(extract_date(text), Some("03/16/2023".to_string()));
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date("WALMART\nTotal 11.00"), None);
        assert_eq!(extract_date(""), None);
    }
}
