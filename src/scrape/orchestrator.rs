//! Crawl orchestration
//!
//! Composes the search-space enumeration with the pagination driver into
//! one sequential, cancellable crawl over a single shared page handle.
//! Queries run strictly one after another (the page is a shared resource
//! and the portal's rate limiter punishes concurrency), and every emitted
//! page reaches the sink before the next fetch begins.

use crate::config::Config;
use crate::output::Sink;
use crate::page::PageCapability;
use crate::scrape::paginator::PaginationDriver;
use crate::scrape::search_space::search_space;
use crate::Result;
use tokio_util::sync::CancellationToken;

/// Aggregate counters for one crawl run.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Queries driven to their terminal state.
    pub queries_processed: u32,

    /// Queries that ended on a terminal failure instead of an empty page.
    pub queries_failed: u32,

    /// Pages accepted by the sink.
    pub pages_emitted: u32,

    /// Records across all emitted pages.
    pub records_emitted: u64,

    /// Job cards skipped by the extractor.
    pub item_faults: u64,

    /// Pages the sink refused.
    pub sink_failures: u32,

    /// True when the run was cut short by cancellation.
    pub cancelled: bool,
}

/// Sequentially crawls the configured search space.
pub struct Orchestrator<'a, P: PageCapability + ?Sized> {
    page: &'a P,
    config: &'a Config,
    cancel: CancellationToken,
}

impl<'a, P: PageCapability + ?Sized> Orchestrator<'a, P> {
    pub fn new(page: &'a P, config: &'a Config, cancel: CancellationToken) -> Self {
        Self {
            page,
            config,
            cancel,
        }
    }

    /// Runs the crawl to completion or cancellation.
    ///
    /// A page capability that cannot even take the configured request
    /// headers is unusable, and that is the one failure that aborts the
    /// whole run; anything that goes wrong inside a single query stays
    /// confined to that query's report.
    pub async fn run(&self, sink: &mut dyn Sink) -> Result<CrawlReport> {
        self.page
            .set_request_headers(&self.config.request.headers())
            .await?;

        let queries = search_space(
            &self.config.search.locations,
            &self.config.search.technologies,
        );
        tracing::info!("Crawling {} search queries", queries.len());

        let driver = PaginationDriver::new(self.page, self.config);
        let mut report = CrawlReport::default();

        for query in &queries {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let query_report = driver.run(query, sink, &self.cancel).await;

            report.queries_processed += 1;
            report.pages_emitted += query_report.pages_emitted;
            report.records_emitted += query_report.records_emitted;
            report.item_faults += query_report.item_faults;
            report.sink_failures += query_report.sink_failures;
            if let Some(failure) = &query_report.failure {
                report.queries_failed += 1;
                tracing::warn!("{} ended on failure: {}", query, failure);
            }
            if query_report.cancelled {
                report.cancelled = true;
                break;
            }
        }

        tracing::info!(
            "Crawl finished: {} queries ({} failed), {} pages, {} records, {} item faults",
            report.queries_processed,
            report.queries_failed,
            report.pages_emitted,
            report.records_emitted,
            report.item_faults
        );

        Ok(report)
    }
}

/// Convenience entry point: crawl `config`'s search space with `page`,
/// emitting into `sink`.
pub async fn run_crawl<P: PageCapability + ?Sized>(
    page: &P,
    config: &Config,
    sink: &mut dyn Sink,
    cancel: CancellationToken,
) -> Result<CrawlReport> {
    Orchestrator::new(page, config, cancel).run(sink).await
}
