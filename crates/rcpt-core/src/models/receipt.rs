//! Receipt extraction data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the merchant name was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantSource {
    /// A known-merchant pattern matched.
    Known,
    /// Guessed from the first merchant-like line.
    Heuristic,
}

/// Fields extracted from one receipt's text.
///
/// Every field is optional: ambiguous or unrecognized input yields `None`,
/// never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Merchant display name.
    pub merchant_name: Option<String>,

    /// Total amount paid.
    pub total_amount: Option<Decimal>,

    /// Purchase date exactly as matched in the text (not validated).
    pub purchased_at: Option<String>,

    /// Category of the matched known merchant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// How `merchant_name` was obtained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_source: Option<MerchantSource>,
}

impl ExtractionResult {
    /// True when no field could be extracted.
    pub fn is_empty(&self) -> bool {
        self.merchant_name.is_none() && self.total_amount.is_none() && self.purchased_at.is_none()
    }

    /// Names of the absent core fields.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.merchant_name.is_none() {
            missing.push("merchant_name");
        }
        if self.total_amount.is_none() {
            missing.push("total_amount");
        }
        if self.purchased_at.is_none() {
            missing.push("purchased_at");
        }
        missing
    }
}
