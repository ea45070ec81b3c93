//! Known-merchant reference data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::MerchantError;

/// A configured merchant matched by substring against receipt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownMerchant {
    /// Lower-case substring searched for in the receipt text.
    pub search_pattern: String,

    /// Canonical name reported when the pattern matches.
    pub display_name: String,

    /// Optional grouping label (e.g. "Grocery").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl KnownMerchant {
    pub fn new(
        search_pattern: impl Into<String>,
        display_name: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            search_pattern: search_pattern.into(),
            display_name: display_name.into(),
            category: category.map(str::to_string),
        }
    }
}

/// Ordered, read-only snapshot of known merchants.
///
/// Order is significant: the resolver reports the first entry whose pattern
/// occurs in the text, so earlier entries take priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantTable {
    entries: Vec<KnownMerchant>,
}

const DEFAULT_SEED: &[(&str, &str, &str)] = &[
    ("cheesecake factory", "The Cheesecake Factory", "Restaurant"),
    ("walmart", "Walmart", "Retail"),
    ("target", "Target", "Retail"),
    ("starbucks", "Starbucks", "Cafe"),
    ("whole foods", "Whole Foods Market", "Grocery"),
    ("amazon", "Amazon", "Online"),
    ("cvs", "CVS Pharmacy", "Pharmacy"),
    ("home depot", "The Home Depot", "Hardware"),
];

impl MerchantTable {
    /// Build a table, lower-casing patterns. Surrounding whitespace is kept
    /// and takes part in matching.
    pub fn new(merchants: impl IntoIterator<Item = KnownMerchant>) -> Result<Self, MerchantError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for mut merchant in merchants {
            merchant.search_pattern = merchant.search_pattern.to_lowercase();
            if merchant.search_pattern.trim().is_empty() {
                return Err(MerchantError::EmptyPattern(merchant.display_name));
            }
            if !seen.insert(merchant.search_pattern.clone()) {
                return Err(MerchantError::DuplicatePattern(merchant.search_pattern));
            }
            entries.push(merchant);
        }

        Ok(Self { entries })
    }

    /// The fixed set seeded at startup.
    pub fn default_seed() -> Self {
        Self {
            entries: DEFAULT_SEED
                .iter()
                .map(|(pattern, name, category)| KnownMerchant::new(*pattern, *name, Some(category)))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KnownMerchant> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category of the first entry carrying this display name.
    pub fn find_category(&self, display_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|m| m.display_name == display_name)
            .and_then(|m| m.category.as_deref())
    }
}

impl Default for MerchantTable {
    fn default() -> Self {
        Self::default_seed()
    }
}
