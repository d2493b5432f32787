use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants;

/// An exact monetary amount tagged with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub amount: Decimal,
}

impl Money {
    pub fn usd(amount: Decimal) -> Self {
        Self {
            currency: constants::CURRENCY_USD.to_string(),
            amount,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// A language-tagged text value. The catalog pipeline always produces exactly
/// one entry, but the shape mirrors what the downstream catalog expects.
/// The entry's value stays `None` when the source omitted the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multilingual {
    values: BTreeMap<String, Option<String>>,
}

impl Multilingual {
    pub fn single(language: impl Into<String>, value: Option<String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(language.into(), value);
        Self { values }
    }

    /// The text stored under `language`. Outer `None` means the tag itself is
    /// absent, inner `None` means the tag is present without a value.
    pub fn value(&self, language: &str) -> Option<Option<&str>> {
        self.values.get(language).map(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Multilingual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .values
            .values()
            .flatten()
            .next()
            .map(String::as_str)
            .unwrap_or("");
        write!(f, "{text}")
    }
}

/// The normalized, format-independent product record this pipeline produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalProduct {
    pub id: String,
    pub display_name: Multilingual,
    pub list_price: Money,
    pub sales_price: Money,
}
