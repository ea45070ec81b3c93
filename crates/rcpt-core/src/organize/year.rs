//! Filing year derivation.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A purchase date as it reaches the organizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseDate {
    /// Literal token from the date extractor, e.g. "03/15/2023".
    Token(String),
    /// An already-parsed calendar date.
    Date(NaiveDate),
}

impl From<&str> for PurchaseDate {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

impl From<NaiveDate> for PurchaseDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

/// Where a filing year came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearSource {
    /// Read from the purchase date.
    PurchaseDate,
    /// Default: no usable purchase date.
    CurrentYear,
}

/// The year a document is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingYear {
    pub year: i32,
    pub source: YearSource,
}

impl FilingYear {
    fn current(year: i32) -> Self {
        Self {
            year,
            source: YearSource::CurrentYear,
        }
    }
}

/// Filing year using today's date as the fallback.
pub fn filing_year(purchased_at: Option<&PurchaseDate>) -> FilingYear {
    filing_year_at(purchased_at, Local::now().year())
}

/// Filing year with an explicit fallback year.
///
/// Tokens contribute the text after their last `/`, or after their last `-`
/// when there is no slash. Two-digit years are kept as written ("23" files
/// under year 23). Tokens with neither separator, or whose suffix is not a
/// plain number, fall back to `current_year`.
pub fn filing_year_at(purchased_at: Option<&PurchaseDate>, current_year: i32) -> FilingYear {
    let year = match purchased_at {
        None => None,
        Some(PurchaseDate::Date(date)) => Some(date.year()),
        Some(PurchaseDate::Token(token)) => year_from_token(token),
    };

    match year {
        Some(year) => FilingYear {
            year,
            source: YearSource::PurchaseDate,
        },
        None => {
            debug!("No usable purchase year in {:?}, using {}", purchased_at, current_year);
            FilingYear::current(current_year)
        }
    }
}

fn year_from_token(token: &str) -> Option<i32> {
    let suffix = if let Some((_, rest)) = token.rsplit_once('/') {
        rest
    } else if let Some((_, rest)) = token.rsplit_once('-') {
        rest
    } else {
        return None;
    };

    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
