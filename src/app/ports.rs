use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::IngestError;

/// Transport-side port: retrieves the raw feed payload from a location.
/// Cancellation must be honored while the transfer is in flight; the port
/// performs no retries.
#[async_trait]
pub trait FetcherPort: Send + Sync {
    async fn fetch(&self, url: &str, token: &CancellationToken) -> Result<Vec<u8>, IngestError>;
}

/// Reporting-side port: write-only info/warning channels. The pipeline never
/// reads back from the sink and tolerates any delivery policy behind it.
#[async_trait]
pub trait ReporterPort: Send + Sync {
    async fn info(&self, message: &str);
    async fn warn(&self, message: &str);
}
