use super::{FeedParser, ParsedRow, PriceFailurePolicy, RawProductRecord};
use crate::constants;
use crate::error::IngestError;

/// Header row plus the dash separator under it; always excluded.
const HEADER_ROWS: usize = 2;
/// Rows that collapse to fewer columns than this are layout artifacts.
const MIN_COLUMNS: usize = 6;
/// Horizontal-rule rows inside the table body.
const RULE_MARKER: &str = "-------------";

/// Parses the pipe-delimited text rendition. Rows are split on any of the
/// usual line endings; each row is split on `|` with fields trimmed and
/// empty-after-trim fields discarded. That collapse removes the artifacts of
/// leading/trailing delimiters, but it also means a genuinely empty column
/// shifts every later column index. The feed has never exercised that case;
/// the behavior is kept as-is rather than guessed around.
pub struct DelimitedFeedParser;

impl FeedParser for DelimitedFeedParser {
    fn feed_name(&self) -> &'static str {
        constants::DELIMITED_FEED
    }

    fn payload_label(&self) -> &'static str {
        "text"
    }

    fn currency_markers(&self) -> &'static [&'static str] {
        // Prices in this rendition show up with either decoration.
        &["$", "USD"]
    }

    fn price_failure_policy(&self) -> PriceFailurePolicy {
        PriceFailurePolicy::DropRecord
    }

    fn empty_feed_is_failure(&self) -> bool {
        // A table with no body rows is a zero-count success.
        false
    }

    fn parse(&self, payload: &[u8]) -> Result<Vec<ParsedRow>, IngestError> {
        let text = String::from_utf8_lossy(payload);
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut rows = Vec::new();
        for row in normalized.split('\n').skip(HEADER_ROWS) {
            if row.trim().is_empty() {
                rows.push(ParsedRow::Skipped {
                    warning: "Skipping empty row.".to_string(),
                });
                continue;
            }

            let columns: Vec<&str> = row
                .split('|')
                .map(str::trim)
                .filter(|column| !column.is_empty())
                .collect();

            // Separator art and ragged rows are dropped without a warning.
            if columns.len() < MIN_COLUMNS || row.contains(RULE_MARKER) {
                continue;
            }

            rows.push(ParsedRow::Record(RawProductRecord {
                product_id: Some(columns[0].to_string()),
                product_name: Some(columns[1].to_string()),
                sales_price_text: Some(columns[3].to_string()),
                list_price_text: Some(columns[4].to_string()),
                raw_row: Some(row.to_string()),
            }));
        }

        Ok(rows)
    }
}
