/// Feed name constants to ensure consistency across the codebase.
/// These constants define the mapping between user-friendly feed names
/// (used in the CLI) and the jobs that ingest them.
// User-friendly feed names (used in CLI)
pub const JSON_FEED: &str = "json_feed";
pub const XML_FEED: &str = "xml_feed";
pub const DELIMITED_FEED: &str = "delimited_feed";

// Default endpoints serving the three renditions of the catalog
pub const DEFAULT_JSON_FEED_URL: &str =
    "https://cdn.relewise.com/academy/productdata/customjsonfeed";
pub const DEFAULT_XML_FEED_URL: &str =
    "https://cdn.relewise.com/academy/productdata/googleshoppingfeed";
pub const DEFAULT_DELIMITED_FEED_URL: &str = "https://cdn.relewise.com/academy/productdata/raw";

// Canonical product constants
pub const CURRENCY_USD: &str = "USD";
pub const LANGUAGE_EN: &str = "en";
pub const UNKNOWN_PRODUCT_ID: &str = "Unknown";

/// Namespace the XML shopping feed binds its product fields to.
pub const XML_FEED_NAMESPACE: &str = "http://base.google.com/ns/1.0";

/// Get all supported user-friendly feed names
pub fn supported_feeds() -> Vec<&'static str> {
    vec![JSON_FEED, XML_FEED, DELIMITED_FEED]
}
