//! The pagination driver
//!
//! Walks one search query through its listing pages: fetch page N, classify
//! and retry failures, extract records, emit non-empty pages to the sink,
//! advance to N+1. The page index strictly increases and the walk halts at
//! the first page with zero records, so every query's run is finite.
//!
//! Failures that survive the retry budget are caught here, at the driver
//! boundary: they degrade to an empty terminal page plus a diagnostic, and
//! never abort the crawl of the remaining queries.

use crate::config::Config;
use crate::extract::Extraction;
use crate::output::{PageResult, Sink};
use crate::page::PageCapability;
use crate::scrape::backoff::{classify_if_retryable, RetryAction, RetryPolicy};
use crate::scrape::description::fetch_description;
use crate::scrape::fetcher::fetch_listing_page;
use crate::scrape::SearchQuery;
use crate::{site, Result};
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// What one query's pagination run produced.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub query: SearchQuery,

    /// Pages accepted by the sink.
    pub pages_emitted: u32,

    /// Records across all emitted pages.
    pub records_emitted: u64,

    /// Job cards skipped by the extractor.
    pub item_faults: u64,

    /// Terminal failure that ended the query early, if any.
    pub failure: Option<String>,

    /// Pages the sink refused.
    pub sink_failures: u32,

    /// True when cancellation cut the run short.
    pub cancelled: bool,
}

impl QueryReport {
    fn new(query: SearchQuery) -> Self {
        Self {
            query,
            pages_emitted: 0,
            records_emitted: 0,
            item_faults: 0,
            failure: None,
            sink_failures: 0,
            cancelled: false,
        }
    }
}

/// Drives one search query to its terminal state over a shared page handle.
pub struct PaginationDriver<'a, P: PageCapability + ?Sized> {
    page: &'a P,
    headers: HashMap<String, String>,
    listing_policy: RetryPolicy,
    description_policy: RetryPolicy,
    selector_timeout: Duration,
    vocabulary: &'a [String],
    fetch_descriptions: bool,
}

impl<'a, P: PageCapability + ?Sized> PaginationDriver<'a, P> {
    pub fn new(page: &'a P, config: &'a Config) -> Self {
        Self {
            page,
            headers: config.request.headers(),
            listing_policy: config.retry.listing_policy(),
            description_policy: config.retry.description_policy(),
            selector_timeout: Duration::from_millis(config.crawler.selector_timeout_ms),
            vocabulary: &config.search.tags,
            fetch_descriptions: config.crawler.fetch_descriptions,
        }
    }

    /// Runs the query to its terminal state, emitting every non-empty page
    /// to `sink` in pagination order.
    pub async fn run(
        &self,
        query: &SearchQuery,
        sink: &mut dyn Sink,
        cancel: &CancellationToken,
    ) -> QueryReport {
        let mut report = QueryReport::new(query.clone());
        let mut page_index = 0u32;

        loop {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let extraction = match self.fetch_with_retry(query, page_index, cancel).await {
                Ok(extraction) => extraction,
                Err(error) => {
                    // Driver boundary: the failed page becomes an empty one,
                    // which terminates this query below without touching the
                    // rest of the crawl.
                    tracing::error!("{} page {} failed: {}", query, page_index, error);
                    report.failure = Some(error.to_string());
                    Extraction {
                        records: Vec::new(),
                        skipped: 0,
                    }
                }
            };

            report.item_faults += u64::from(extraction.skipped);
            let mut records = extraction.records;

            tracing::info!(
                "{} page {}: {} records ({})",
                query,
                page_index,
                records.len(),
                site::listing_url(query, page_index)
            );

            if records.is_empty() {
                break;
            }

            if self.fetch_descriptions {
                for record in &mut records {
                    if cancel.is_cancelled() {
                        report.cancelled = true;
                        break;
                    }
                    record.description = fetch_description(
                        self.page,
                        &record.url,
                        &self.headers,
                        &self.description_policy,
                        cancel,
                    )
                    .await;
                }
            }

            report.records_emitted += records.len() as u64;
            let result = PageResult {
                query: query.clone(),
                page_index,
                records,
            };
            match sink.accept(result) {
                Ok(()) => report.pages_emitted += 1,
                Err(error) => {
                    // Surfaced, not fatal: a sink hiccup must not stop the
                    // pagination walk or the other queries.
                    report.sink_failures += 1;
                    tracing::error!("Sink rejected {} page {}: {}", query, page_index, error);
                }
            }

            page_index += 1;
        }

        report
    }

    /// Fetches one listing page, retrying retryable failures with linear
    /// backoff until the policy gives up.
    async fn fetch_with_retry(
        &self,
        query: &SearchQuery,
        page_index: u32,
        cancel: &CancellationToken,
    ) -> Result<Extraction> {
        let scrape_date = chrono::Local::now().date_naive();
        let mut attempt = 1u32;
        loop {
            let outcome = fetch_listing_page(
                self.page,
                query,
                page_index,
                self.vocabulary,
                &self.headers,
                self.selector_timeout,
                scrape_date,
            )
            .await;

            match outcome {
                Ok(extraction) => return Ok(extraction),
                Err(error) => match classify_if_retryable(&error, attempt, &self.listing_policy) {
                    RetryAction::RetryAfter(delay) => {
                        tracing::info!(
                            "Attempt {} for {} page {} failed ({}); retrying in {:?}",
                            attempt,
                            query,
                            page_index,
                            error,
                            delay
                        );
                        tokio::select! {
                            _ = cancel.cancelled() => return Err(error),
                            _ = tokio::time::sleep(delay) => {}
                        }
                        attempt += 1;
                    }
                    RetryAction::Fail => return Err(error),
                },
            }
        }
    }
}
