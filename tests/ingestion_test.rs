use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use catalog_scraper::app::ports::ReporterPort;
use catalog_scraper::domain::Money;
use catalog_scraper::feeds::{FeedKind, ProductFeedJob};
use catalog_scraper::infra::http_client::ReqwestFetcher;
use catalog_scraper::types::{Job, JobArguments};

/// Captures every message so tests can assert on content and ordering.
#[derive(Default)]
struct CollectingReporter {
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl CollectingReporter {
    fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReporterPort for CollectingReporter {
    async fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    async fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

fn dec(text: &str) -> Decimal {
    text.parse().unwrap()
}

fn fetcher() -> Arc<ReqwestFetcher> {
    Arc::new(ReqwestFetcher::new(Duration::from_secs(5)).unwrap())
}

fn arguments() -> JobArguments {
    JobArguments::new(Uuid::new_v4(), "test-api-key", HashMap::new())
}

async fn serve(body: &str, content_type: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), content_type))
        .mount(&server)
        .await;
    server
}

fn feed_job(kind: FeedKind, server: &MockServer) -> ProductFeedJob {
    ProductFeedJob::new(kind, fetcher(), format!("{}/feed", server.uri()), true)
}

#[tokio::test]
async fn json_feed_maps_products_to_canonical_form() {
    let body = r#"[{"productId":"P1","productName":"Widget","salesPrice":"$9.99","listPrice":"$12.00"}]"#;
    let server = serve(body, "application/json").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Json, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.message, "Successfully mapped 1 products.");

    let product = &report.products[0];
    assert_eq!(product.id, "P1");
    assert_eq!(product.display_name.value("en"), Some(Some("Widget")));
    assert_eq!(product.sales_price, Money::usd(dec("9.99")));
    assert_eq!(product.list_price, Money::usd(dec("12.00")));

    let infos = reporter.infos();
    assert_eq!(infos[0], "Product data downloaded successfully.");
    assert!(infos[1].contains("Mapped product ID: P1"));
    assert!(reporter.warnings().is_empty());
}

#[tokio::test]
async fn json_feed_missing_fields_fall_back() {
    let body = r#"[{"salesPrice":"$9.99"},{"productId":"P2","salesPrice":"bogus","listPrice":"$3.00"}]"#;
    let server = serve(body, "application/json").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Json, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.products[0].id, "Unknown");
    assert_eq!(report.products[0].display_name.value("en"), Some(None));
    assert_eq!(report.products[0].list_price, Money::usd(Decimal::ZERO));
    // unparsable price falls back to zero instead of dropping the record
    assert_eq!(report.products[1].sales_price, Money::usd(Decimal::ZERO));
    assert_eq!(report.products[1].list_price, Money::usd(dec("3.00")));
}

#[tokio::test]
async fn xml_feed_maps_namespaced_items() {
    let body = r#"<?xml version="1.0"?>
<rss xmlns:g="http://base.google.com/ns/1.0">
  <channel>
    <item>
      <g:id>X1</g:id>
      <title>Trail Shoe</title>
      <g:price>89.90 USD</g:price>
      <g:sale_price>79.90 USD</g:sale_price>
    </item>
    <item>
      <title>No Id</title>
      <g:price>10.00 USD</g:price>
    </item>
  </channel>
</rss>"#;
    let server = serve(body, "application/xml").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Xml, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.products[0].id, "X1");
    assert_eq!(report.products[0].list_price, Money::usd(dec("89.90")));
    assert_eq!(report.products[0].sales_price, Money::usd(dec("79.90")));
    assert_eq!(report.products[1].id, "Unknown");
    assert_eq!(report.products[1].sales_price, Money::usd(Decimal::ZERO));
    assert_eq!(report.products[1].list_price, Money::usd(dec("10.00")));
}

#[tokio::test]
async fn delimited_feed_drops_rows_with_unparsable_prices() {
    let body = "\
ID | Name | Category | Sales | List | Stock
-------------------------------------------
P2 | Gadget | X | $5.00 | $7.00 | Y
P3 | Bad | X | abc | $7.00 | Y";
    let server = serve(body, "text/plain").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Delimited, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.message, "Successfully mapped 1 products.");
    assert_eq!(report.products[0].id, "P2");
    assert_eq!(report.products[0].sales_price, Money::usd(dec("5.00")));

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("P3 | Bad | X | abc | $7.00 | Y"));
    assert!(warnings[0].starts_with("Error parsing prices for row"));
}

#[tokio::test]
async fn delimited_feed_warnings_keep_row_order() {
    let body = "\
ID | Name | Category | Sales | List | Stock
-------------------------------------------

P2 | Gadget | X | $5.00 | $7.00 | Y
P3 | Bad | X | abc | $7.00 | Y";
    let server = serve(body, "text/plain").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Delimited, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 1);
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0], "Skipping empty row.");
    assert!(warnings[1].starts_with("Error parsing prices for row"));
}

#[tokio::test]
async fn empty_json_feed_is_a_reported_failure() {
    let server = serve("[]", "application/json").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Json, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 0);
    assert!(report.products.is_empty());
    assert_eq!(
        report.summary.message,
        "Failed to deserialize products: No products found."
    );
    assert_eq!(
        reporter.warnings(),
        vec!["No products found in the JSON data.".to_string()]
    );
}

#[tokio::test]
async fn xml_feed_without_items_is_a_reported_failure() {
    let body = r#"<rss xmlns:g="http://base.google.com/ns/1.0"><channel><title>empty</title></channel></rss>"#;
    let server = serve(body, "application/xml").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Xml, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 0);
    assert_eq!(
        reporter.warnings(),
        vec!["No products found in the XML data.".to_string()]
    );
}

#[tokio::test]
async fn malformed_json_aborts_the_run() {
    let server = serve("{\"not\":\"an array\"", "application/json").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Json, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 0);
    assert!(report.summary.message.starts_with("Failed to parse JSON data:"));
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("JSON deserialization error:"));
}

#[tokio::test]
async fn transport_failure_is_reported_not_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Json, &server);

    let report = job
        .run(&arguments(), reporter.as_ref(), &CancellationToken::new())
        .await;

    assert_eq!(report.summary.succeeded, 0);
    assert!(report.summary.message.starts_with("Failed to download data:"));
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("HTTP request error:"));
    assert!(reporter.infos().is_empty());
}

#[tokio::test]
async fn cancellation_before_fetch_yields_no_products() {
    let reporter = Arc::new(CollectingReporter::default());
    let job = ProductFeedJob::new(
        FeedKind::Json,
        fetcher(),
        "http://127.0.0.1:9/feed",
        true,
    );
    let token = CancellationToken::new();
    token.cancel();

    let report = job.run(&arguments(), reporter.as_ref(), &token).await;

    assert_eq!(report.summary.succeeded, 0);
    assert!(report.products.is_empty());
    assert!(report.summary.message.starts_with("Failed to process data:"));
    assert!(reporter.infos().is_empty());
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Unexpected error:"));
}

#[tokio::test]
async fn execute_returns_the_terminal_message() {
    let body = r#"[{"productId":"P1","productName":"Widget","salesPrice":"$9.99","listPrice":"$12.00"}]"#;
    let server = serve(body, "application/json").await;
    let reporter = Arc::new(CollectingReporter::default());
    let job = feed_job(FeedKind::Json, &server);

    let message = job
        .execute(&arguments(), reporter.clone(), CancellationToken::new())
        .await;

    assert_eq!(message, "Successfully mapped 1 products.");
}
