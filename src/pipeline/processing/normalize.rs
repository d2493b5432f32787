use rust_decimal::Decimal;

use crate::constants;
use crate::domain::{CanonicalProduct, Money, Multilingual};
use crate::error::IngestError;
use crate::pipeline::processing::parser::RawProductRecord;

/// Convert a currency-decorated price token into an exact decimal amount.
///
/// An absent token is an exact zero, never an error. Otherwise every listed
/// currency marker is stripped and the remainder parsed as a
/// culture-invariant decimal. Failures carry the original token so callers
/// can decide between dropping the record and falling back to zero.
pub fn normalize_price(text: Option<&str>, markers: &[&str]) -> Result<Decimal, IngestError> {
    let Some(raw) = text else {
        return Ok(Decimal::ZERO);
    };

    let mut cleaned = raw.to_string();
    for marker in markers {
        cleaned = cleaned.replace(marker, "");
    }

    parse_invariant_decimal(&cleaned).ok_or_else(|| IngestError::PriceFormat {
        text: raw.to_string(),
    })
}

/// Invariant-culture decimal parsing accepting the conventional visual
/// styles: surrounding whitespace, a leading sign, thousands-grouping
/// commas, parenthesized negatives, and scientific notation.
fn parse_invariant_decimal(text: &str) -> Option<Decimal> {
    let mut trimmed = text.trim();

    let mut negative = false;
    if let Some(inner) = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        negative = true;
        trimmed = inner.trim();
    }

    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = unsigned.replace(',', "");
    if digits.is_empty() {
        return None;
    }

    let parsed = digits
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&digits).ok())?;

    Some(if negative { -parsed } else { parsed })
}

/// Builds the canonical product out of an intermediate record plus its
/// normalized prices. All row tolerance was applied upstream; the only
/// fallback left here is the id sentinel, and the display name is taken
/// verbatim, including absence.
pub struct ProductAssembler;

impl ProductAssembler {
    pub fn assemble(
        record: &RawProductRecord,
        sales_price: Decimal,
        list_price: Decimal,
    ) -> CanonicalProduct {
        let id = record
            .product_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(constants::UNKNOWN_PRODUCT_ID)
            .to_string();

        CanonicalProduct {
            id,
            display_name: Multilingual::single(constants::LANGUAGE_EN, record.product_name.clone()),
            list_price: Money::usd(list_price),
            sales_price: Money::usd(sales_price),
        }
    }
}
