use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use super::{FeedParser, ParsedRow, PriceFailurePolicy, RawProductRecord};
use crate::constants;
use crate::error::IngestError;

const ITEM_ELEMENT: &[u8] = b"item";

/// Product fields recognized inside an `item` element. The id and both price
/// fields live under the feed namespace; the title is un-namespaced.
#[derive(Debug, Clone, Copy)]
enum ItemField {
    Id,
    Title,
    Price,
    SalePrice,
}

impl ItemField {
    fn resolve(ns: &ResolveResult<'_>, local: &[u8]) -> Option<Self> {
        let in_feed_ns = matches!(
            ns,
            ResolveResult::Bound(bound) if bound.0 == constants::XML_FEED_NAMESPACE.as_bytes()
        );
        match local {
            b"id" if in_feed_ns => Some(Self::Id),
            b"price" if in_feed_ns => Some(Self::Price),
            b"sale_price" if in_feed_ns => Some(Self::SalePrice),
            b"title" if matches!(ns, ResolveResult::Unbound) => Some(Self::Title),
            _ => None,
        }
    }

    fn assign(self, record: &mut RawProductRecord, value: String) {
        match self {
            Self::Id => record.product_id = Some(value),
            Self::Title => record.product_name = Some(value),
            Self::Price => record.list_price_text = Some(value),
            Self::SalePrice => record.sales_price_text = Some(value),
        }
    }
}

/// Parses the namespaced XML rendition. Every `item` element is a record,
/// whatever its nesting depth; a missing child element yields an absent
/// field, never an error.
pub struct XmlFeedParser;

impl XmlFeedParser {
    fn parse_document(text: &str) -> Result<Vec<ParsedRow>, IngestError> {
        let mut reader = NsReader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut rows = Vec::new();
        let mut depth = 0usize;
        let mut item_depth: Option<usize> = None;
        let mut current = RawProductRecord::default();
        let mut active_field: Option<ItemField> = None;

        loop {
            match reader.read_resolved_event()? {
                (resolve, Event::Start(start)) => {
                    depth += 1;
                    let local = start.local_name();
                    match item_depth {
                        None if local.as_ref() == ITEM_ELEMENT => {
                            item_depth = Some(depth);
                            current = RawProductRecord::default();
                        }
                        // Only direct children of the item carry fields.
                        Some(item) if depth == item + 1 => {
                            active_field = ItemField::resolve(&resolve, local.as_ref());
                            if let Some(field) = active_field {
                                // present-but-empty child still counts as present
                                field.assign(&mut current, String::new());
                            }
                        }
                        _ => {}
                    }
                }
                (resolve, Event::Empty(start)) => {
                    let local = start.local_name();
                    match item_depth {
                        None if local.as_ref() == ITEM_ELEMENT => {
                            rows.push(ParsedRow::Record(RawProductRecord::default()));
                        }
                        Some(item) if depth == item => {
                            if let Some(field) = ItemField::resolve(&resolve, local.as_ref()) {
                                field.assign(&mut current, String::new());
                            }
                        }
                        _ => {}
                    }
                }
                (_, Event::Text(text)) => {
                    if let Some(field) = active_field {
                        let value = text.unescape().map_err(quick_xml::Error::from)?.into_owned();
                        field.assign(&mut current, value);
                    }
                }
                (_, Event::End(_)) => {
                    match item_depth {
                        Some(item) if depth == item => {
                            rows.push(ParsedRow::Record(std::mem::take(&mut current)));
                            item_depth = None;
                        }
                        Some(item) if depth == item + 1 => active_field = None,
                        _ => {}
                    }
                    depth -= 1;
                }
                (_, Event::Eof) => break,
                _ => {}
            }
        }

        Ok(rows)
    }
}

impl FeedParser for XmlFeedParser {
    fn feed_name(&self) -> &'static str {
        constants::XML_FEED
    }

    fn payload_label(&self) -> &'static str {
        "XML"
    }

    fn currency_markers(&self) -> &'static [&'static str] {
        &["USD"]
    }

    fn price_failure_policy(&self) -> PriceFailurePolicy {
        PriceFailurePolicy::FallBackToZero
    }

    fn parse(&self, payload: &[u8]) -> Result<Vec<ParsedRow>, IngestError> {
        let text = String::from_utf8_lossy(payload);
        Self::parse_document(&text)
    }
}
