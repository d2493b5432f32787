use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::ports::ReporterPort;

/// Reporter adapter that forwards run messages to the tracing subscriber.
pub struct TracingReporter;

#[async_trait]
impl ReporterPort for TracingReporter {
    async fn info(&self, message: &str) {
        info!("{message}");
    }

    async fn warn(&self, message: &str) {
        warn!("{message}");
    }
}
