use serde::Deserialize;

use super::{FeedParser, ParsedRow, PriceFailurePolicy, RawProductRecord};
use crate::constants;
use crate::error::IngestError;

/// Wire shape of one entry in the JSON rendition of the catalog. Every field
/// may be absent or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonProduct {
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    sales_price: Option<String>,
    #[serde(default)]
    list_price: Option<String>,
}

/// Parses the JSON array rendition. The whole array is deserialized eagerly;
/// the payload is bounded by feed size, not streamed record-by-record.
pub struct JsonFeedParser;

impl FeedParser for JsonFeedParser {
    fn feed_name(&self) -> &'static str {
        constants::JSON_FEED
    }

    fn payload_label(&self) -> &'static str {
        "JSON"
    }

    fn currency_markers(&self) -> &'static [&'static str] {
        &["$"]
    }

    fn price_failure_policy(&self) -> PriceFailurePolicy {
        PriceFailurePolicy::FallBackToZero
    }

    fn parse(&self, payload: &[u8]) -> Result<Vec<ParsedRow>, IngestError> {
        // A JSON `null` payload counts as an absent array, not a parse error.
        let products: Option<Vec<JsonProduct>> = serde_json::from_slice(payload)?;
        Ok(products
            .unwrap_or_default()
            .into_iter()
            .map(|product| {
                ParsedRow::Record(RawProductRecord {
                    product_id: product.product_id,
                    product_name: product.product_name,
                    sales_price_text: product.sales_price,
                    list_price_text: product.list_price,
                    raw_row: None,
                })
            })
            .collect())
    }
}
