use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::{FetcherPort, ReporterPort};
use crate::domain::CanonicalProduct;
use crate::error::IngestError;
use crate::pipeline::processing::normalize::{normalize_price, ProductAssembler};
use crate::pipeline::processing::parser::{FeedParser, ParsedRow, PriceFailurePolicy};

/// Terminal outcome of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub message: String,
}

/// Structured result of one ingestion run. Only the summary message is
/// surfaced through the job entry point; callers that consume the product
/// list read it from here.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub products: Vec<CanonicalProduct>,
    pub summary: RunSummary,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives one feed from fetch to canonical products. The pipeline is
/// single-flow: records are processed strictly in source order so that the
/// position of every warning relative to its row stays observable.
pub struct FeedPipeline {
    fetcher: Arc<dyn FetcherPort>,
    parser: Box<dyn FeedParser>,
    url: String,
    log_each_product: bool,
}

impl FeedPipeline {
    pub fn new(
        fetcher: Arc<dyn FetcherPort>,
        parser: Box<dyn FeedParser>,
        url: impl Into<String>,
        log_each_product: bool,
    ) -> Self {
        Self {
            fetcher,
            parser,
            url: url.into(),
            log_each_product,
        }
    }

    /// Run the feed to completion. Every failure category folds into the
    /// returned report; nothing propagates out of this method.
    #[instrument(skip_all, fields(feed = self.parser.feed_name()))]
    pub async fn run(&self, reporter: &dyn ReporterPort, token: &CancellationToken) -> RunReport {
        let started_at = Utc::now();
        let (products, message) = match self.ingest(reporter, token).await {
            Ok(products) => {
                let message = format!("Successfully mapped {} products.", products.len());
                info!(count = products.len(), "ingestion finished");
                (products, message)
            }
            Err(error) => (Vec::new(), self.report_failure(reporter, &error).await),
        };

        RunReport {
            summary: RunSummary {
                succeeded: products.len(),
                message,
            },
            products,
            started_at,
            finished_at: Utc::now(),
        }
    }

    async fn ingest(
        &self,
        reporter: &dyn ReporterPort,
        token: &CancellationToken,
    ) -> Result<Vec<CanonicalProduct>, IngestError> {
        let payload = self.fetcher.fetch(&self.url, token).await?;
        reporter.info("Product data downloaded successfully.").await;
        debug!(bytes = payload.len(), "parsing feed payload");

        let rows = self.parser.parse(&payload)?;
        let record_count = rows
            .iter()
            .filter(|row| matches!(row, ParsedRow::Record(_)))
            .count();
        if record_count == 0 && self.parser.empty_feed_is_failure() {
            return Err(IngestError::EmptyFeed);
        }

        let markers = self.parser.currency_markers();
        let mut products = Vec::with_capacity(record_count);

        for row in rows {
            let record = match row {
                ParsedRow::Skipped { warning } => {
                    reporter.warn(&warning).await;
                    continue;
                }
                ParsedRow::Record(record) => record,
            };

            let sales = normalize_price(record.sales_price_text.as_deref(), markers);
            let list = normalize_price(record.list_price_text.as_deref(), markers);

            let (sales_price, list_price) = match self.parser.price_failure_policy() {
                PriceFailurePolicy::FallBackToZero => (
                    sales.unwrap_or(Decimal::ZERO),
                    list.unwrap_or(Decimal::ZERO),
                ),
                PriceFailurePolicy::DropRecord => match (sales, list) {
                    (Ok(sales_price), Ok(list_price)) => (sales_price, list_price),
                    (Err(error), _) | (_, Err(error)) => {
                        let row_text = record.raw_row.as_deref().unwrap_or_default();
                        reporter
                            .warn(&format!(
                                "Error parsing prices for row '{row_text}': {error}"
                            ))
                            .await;
                        warn!(row = row_text, "dropping row with unparsable price");
                        continue;
                    }
                },
            };

            let product = ProductAssembler::assemble(&record, sales_price, list_price);
            if self.log_each_product {
                reporter
                    .info(&format!(
                        "Mapped product ID: {}, Name: {}, List Price: {}, Sale Price: {}",
                        product.id, product.display_name, product.list_price, product.sales_price
                    ))
                    .await;
            }
            products.push(product);
        }

        Ok(products)
    }

    /// Emit the warning for a run-level failure and derive the terminal
    /// message from its category.
    async fn report_failure(&self, reporter: &dyn ReporterPort, error: &IngestError) -> String {
        match error {
            IngestError::Transport(cause) => {
                reporter.warn(&format!("HTTP request error: {cause}")).await;
                format!("Failed to download data: {cause}")
            }
            IngestError::JsonParse(cause) => {
                reporter
                    .warn(&format!("JSON deserialization error: {cause}"))
                    .await;
                format!("Failed to parse JSON data: {cause}")
            }
            IngestError::XmlParse(cause) => {
                reporter.warn(&format!("XML parsing error: {cause}")).await;
                format!("Failed to parse XML data: {cause}")
            }
            IngestError::EmptyFeed => {
                reporter
                    .warn(&format!(
                        "No products found in the {} data.",
                        self.parser.payload_label()
                    ))
                    .await;
                "Failed to deserialize products: No products found.".to_string()
            }
            unexpected => {
                reporter.warn(&format!("Unexpected error: {unexpected}")).await;
                format!("Failed to process data: {unexpected}")
            }
        }
    }
}
