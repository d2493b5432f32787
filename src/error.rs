use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("price text '{text}' is not a decimal amount")]
    PriceFormat { text: String },

    #[error("no products found in the feed payload")]
    EmptyFeed,

    #[error("ingestion was cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
