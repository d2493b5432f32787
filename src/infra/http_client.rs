use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::app::ports::FetcherPort;
use crate::error::IngestError;

/// Reqwest-backed fetch adapter. Non-2xx responses surface as transport
/// errors; a fired cancellation token aborts the transfer before any byte of
/// the payload is handed to the pipeline.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FetcherPort for ReqwestFetcher {
    async fn fetch(&self, url: &str, token: &CancellationToken) -> Result<Vec<u8>, IngestError> {
        if token.is_cancelled() {
            return Err(IngestError::Cancelled);
        }

        let response = tokio::select! {
            result = self.client.get(url).send() => result?,
            _ = token.cancelled() => return Err(IngestError::Cancelled),
        };
        let response = response.error_for_status()?;

        let bytes = tokio::select! {
            result = response.bytes() => result?,
            _ = token.cancelled() => return Err(IngestError::Cancelled),
        };

        debug!(url, bytes = bytes.len(), "feed payload downloaded");
        Ok(bytes.to_vec())
    }
}
