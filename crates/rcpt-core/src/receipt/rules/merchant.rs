//! Merchant identification for receipts.

use tracing::trace;

use super::patterns::{LEADING_DIGIT, MERCHANT_LINE_MIN_LEN, MERCHANT_STOP_WORDS};
use crate::models::merchant::MerchantTable;
use crate::models::receipt::MerchantSource;

/// A resolved merchant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantMatch {
    /// Display name.
    pub name: String,
    /// Category of the known merchant, if any.
    pub category: Option<String>,
    /// Whether the table or the line heuristic produced the name.
    pub source: MerchantSource,
}

/// Resolve the merchant for a receipt text.
///
/// Known merchants are tried in table order and the first pattern contained
/// in the lower-cased text wins. Otherwise the first merchant-like line is
/// title-cased.
pub fn resolve_merchant(text: &str, known: &MerchantTable) -> Option<MerchantMatch> {
    let lower = text.to_lowercase();

    if let Some(merchant) = known.iter().find(|m| lower.contains(&m.search_pattern)) {
        trace!("Known merchant pattern {:?} matched", merchant.search_pattern);
        return Some(MerchantMatch {
            name: merchant.display_name.clone(),
            category: merchant.category.clone(),
            source: MerchantSource::Known,
        });
    }

    guess_merchant_line(text).map(|line| MerchantMatch {
        name: title_case(line),
        category: None,
        source: MerchantSource::Heuristic,
    })
}

/// First trimmed line that looks like a merchant name.
///
/// A line qualifies when it is longer than four characters, does not start
/// with a decimal digit and contains none of the stop words.
pub fn guess_merchant_line(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .find(|line| {
            let lower = line.to_lowercase();
            line.chars().count() > MERCHANT_LINE_MIN_LEN
                && !LEADING_DIGIT.is_match(line)
                && !MERCHANT_STOP_WORDS.iter().any(|w| lower.contains(w))
        })
}

/// Naive title casing: the first letter of every run of letters is upper-cased
/// and the rest lower-cased, so "JOE'S DINER" becomes "Joe'S Diner".
/// Letters whose upper case expands ("ß" to "SS") keep only the first
/// character upper-cased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
                out.extend(upper.flat_map(char::to_lowercase));
            }
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }

    out
}
