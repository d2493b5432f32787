use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app::ports::ReporterPort;

/// Opaque execution context handed to every job. The ingestion pipeline
/// passes it through without interpreting any field.
#[derive(Debug, Clone)]
pub struct JobArguments {
    pub dataset_id: Uuid,
    pub api_key: String,
    pub job_configuration: HashMap<String, String>,
}

impl JobArguments {
    pub fn new(
        dataset_id: Uuid,
        api_key: impl Into<String>,
        job_configuration: HashMap<String, String>,
    ) -> Self {
        Self {
            dataset_id,
            api_key: api_key.into(),
            job_configuration,
        }
    }
}

/// Core trait that all ingestion jobs implement.
#[async_trait]
pub trait Job: Send + Sync {
    /// Unique identifier for this job
    fn job_name(&self) -> &'static str;

    /// Run the job to completion and return the terminal status message.
    /// The method never fails: every outcome, including cancellation, is
    /// reported through the returned message and the warning channel.
    async fn execute(
        &self,
        arguments: &JobArguments,
        reporter: Arc<dyn ReporterPort>,
        token: CancellationToken,
    ) -> String;
}
