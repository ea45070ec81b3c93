//! Common regex patterns and keyword lists for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Keywords marking a line near the receipt total.
pub const TOTAL_KEYWORDS: &[&str] = &["total", "amount", "balance", "payment"];

/// Words that disqualify a line from being guessed as the merchant name.
pub const MERCHANT_STOP_WORDS: &[&str] = &["tax", "total", "subtotal", "date"];

/// Lines after the keyword line included in the amount search window.
pub const AMOUNT_WINDOW_TRAILING_LINES: usize = 2;

/// Minimum length (exclusive) of a heuristic merchant line, in characters.
pub const MERCHANT_LINE_MIN_LEN: usize = 4;

lazy_static! {
    // Monetary amount: ASCII digits, a decimal point, exactly two ASCII digits
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(?-u:\d)+\.(?-u:\d){2}"
    ).unwrap();

    // Any Unicode decimal digit at the start of a line
    pub static ref LEADING_DIGIT: Regex = Regex::new(r"^\d").unwrap();

    // 03/15/2023, 3/5/23
    pub static ref DATE_SLASH: Regex = Regex::new(
        r"\d{1,2}/\d{1,2}/\d{2,4}"
    ).unwrap();

    // 15-03-2023, 5-3-23
    pub static ref DATE_HYPHEN: Regex = Regex::new(
        r"\d{1,2}-\d{1,2}-\d{2,4}"
    ).unwrap();

    // 15 March 2023
    pub static ref DATE_LONG: Regex = Regex::new(
        r"\d{1,2} \w{3,} \d{4}"
    ).unwrap();

    /// Date patterns in priority order.
    pub static ref DATE_PATTERNS: [&'static Regex; 3] = [&*DATE_SLASH, &*DATE_HYPHEN, &*DATE_LONG];
}
