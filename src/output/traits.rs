//! Sink trait and types
//!
//! The crawl engine hands each extracted page of records to a sink and
//! forgets about it; whether the sink writes files or inserts database rows
//! is its own business. Sink failures come back as ordinary errors that the
//! driver surfaces without aborting the crawl.

use crate::record::JobRecord;
use crate::scrape::SearchQuery;
use thiserror::Error;

/// Errors that can occur while emitting results
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// One emitted page of crawl results. Ownership moves into the sink.
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The search query this page belongs to.
    pub query: SearchQuery,

    /// Zero-based page number within the query's listing.
    pub page_index: u32,

    /// Extracted records in card order.
    pub records: Vec<JobRecord>,
}

/// Receiver for emitted pages.
pub trait Sink {
    /// Accepts one page of results.
    fn accept(&mut self, result: PageResult) -> SinkResult<()>;
}
