pub mod delimited;
pub mod json;
pub mod xml;

pub use delimited::DelimitedFeedParser;
pub use json::JsonFeedParser;
pub use xml::XmlFeedParser;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Loosely typed product record as extracted from one wire format, before
/// price normalization. A transport shape only; it is never persisted and is
/// discarded once the canonical product has been assembled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProductRecord {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub sales_price_text: Option<String>,
    pub list_price_text: Option<String>,
    /// Original row text, kept so row-scoped diagnostics can quote their
    /// source (delimited feed only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_row: Option<String>,
}

/// One positional outcome in the parsed row stream. Skips carry their warning
/// text in-line so the orchestrator can emit messages in exact source order.
#[derive(Debug, Clone)]
pub enum ParsedRow {
    Record(RawProductRecord),
    Skipped { warning: String },
}

/// How a parser wants row-scoped price failures handled downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceFailurePolicy {
    /// Substitute exact zero for the price that failed to parse and keep the
    /// record.
    FallBackToZero,
    /// Drop the whole record and warn, quoting the source row.
    DropRecord,
}

/// One wire-format rendition of the product catalog. Implementations are
/// stateless and tolerant of individual malformed rows; only a payload that
/// cannot be interpreted as the claimed format at all is an error.
pub trait FeedParser: Send + Sync {
    /// Unique identifier for this feed variant
    fn feed_name(&self) -> &'static str;

    /// Payload label used in operator-facing messages ("JSON", "XML", ...)
    fn payload_label(&self) -> &'static str;

    /// Currency markers decorating price fields in this rendition
    fn currency_markers(&self) -> &'static [&'static str];

    fn price_failure_policy(&self) -> PriceFailurePolicy;

    /// Whether a structurally valid payload with zero records counts as a
    /// failed run rather than an empty success.
    fn empty_feed_is_failure(&self) -> bool {
        true
    }

    fn parse(&self, payload: &[u8]) -> Result<Vec<ParsedRow>, IngestError>;
}
