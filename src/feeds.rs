use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::app::ports::{FetcherPort, ReporterPort};
use crate::config::Config;
use crate::constants;
use crate::pipeline::processing::parser::{
    DelimitedFeedParser, FeedParser, JsonFeedParser, XmlFeedParser,
};
use crate::pipeline::runner::{FeedPipeline, RunReport};
use crate::types::{Job, JobArguments};

/// The wire formats the catalog source can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Json,
    Xml,
    Delimited,
}

impl FeedKind {
    /// Resolve a user-facing feed name (CLI spelling or canonical name).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" | constants::JSON_FEED => Some(Self::Json),
            "xml" | constants::XML_FEED => Some(Self::Xml),
            "delimited" | constants::DELIMITED_FEED => Some(Self::Delimited),
            _ => None,
        }
    }

    pub fn feed_name(&self) -> &'static str {
        match self {
            Self::Json => constants::JSON_FEED,
            Self::Xml => constants::XML_FEED,
            Self::Delimited => constants::DELIMITED_FEED,
        }
    }

    pub fn parser(&self) -> Box<dyn FeedParser> {
        match self {
            Self::Json => Box::new(JsonFeedParser),
            Self::Xml => Box::new(XmlFeedParser),
            Self::Delimited => Box::new(DelimitedFeedParser),
        }
    }

    fn configured_url(&self, config: &Config) -> String {
        match self {
            Self::Json => config.feeds.json_url.clone(),
            Self::Xml => config.feeds.xml_url.clone(),
            Self::Delimited => config.feeds.delimited_url.clone(),
        }
    }
}

/// One ingestion job per feed format. The parser variant is selected by the
/// kind; everything downstream of parsing is shared.
pub struct ProductFeedJob {
    kind: FeedKind,
    pipeline: FeedPipeline,
}

impl ProductFeedJob {
    pub fn new(
        kind: FeedKind,
        fetcher: Arc<dyn FetcherPort>,
        url: impl Into<String>,
        log_each_product: bool,
    ) -> Self {
        let pipeline = FeedPipeline::new(fetcher, kind.parser(), url, log_each_product);
        Self { kind, pipeline }
    }

    pub fn from_config(kind: FeedKind, fetcher: Arc<dyn FetcherPort>, config: &Config) -> Self {
        Self::new(
            kind,
            fetcher,
            kind.configured_url(config),
            config.log_each_product,
        )
    }

    /// Full structured result, for callers that consume the product list
    /// rather than the terminal message.
    pub async fn run(
        &self,
        _arguments: &JobArguments,
        reporter: &dyn ReporterPort,
        token: &CancellationToken,
    ) -> RunReport {
        self.pipeline.run(reporter, token).await
    }
}

#[async_trait]
impl Job for ProductFeedJob {
    fn job_name(&self) -> &'static str {
        self.kind.feed_name()
    }

    async fn execute(
        &self,
        arguments: &JobArguments,
        reporter: Arc<dyn ReporterPort>,
        token: CancellationToken,
    ) -> String {
        self.run(arguments, reporter.as_ref(), &token)
            .await
            .summary
            .message
    }
}
