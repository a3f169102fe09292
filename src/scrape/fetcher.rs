//! One listing-page fetch
//!
//! Navigates the shared page handle to a query's listing URL and extracts
//! the job cards. Rate limits and soft walls surface as retryable errors for
//! the driver's classifier; a listing selector that never appears degrades
//! to an empty page unless the location reveals a soft wall.

use crate::extract::{extract_records, Extraction};
use crate::page::{PageCapability, WaitOutcome, WaitUntil};
use crate::scrape::SearchQuery;
use crate::{site, Result, ShigotoError};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::time::Duration;

const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Fetches and extracts one page of a query's listing.
///
/// An empty extraction means the page had no job cards; the caller treats
/// that as the query's terminal page, not as a failure.
pub async fn fetch_listing_page<P: PageCapability + ?Sized>(
    page: &P,
    query: &SearchQuery,
    page_index: u32,
    vocabulary: &[String],
    headers: &HashMap<String, String>,
    selector_timeout: Duration,
    scrape_date: NaiveDate,
) -> Result<Extraction> {
    page.set_request_headers(headers).await?;

    let url = site::listing_url(query, page_index);
    let response = page.navigate(&url, WaitUntil::NetworkSettled).await?;

    if response.status == STATUS_TOO_MANY_REQUESTS {
        return Err(ShigotoError::RateLimited {
            status: response.status,
            url,
        });
    }

    let location = page.current_location().await?;
    if site::is_soft_wall(&location) {
        return Err(ShigotoError::SoftWall { location });
    }

    match page
        .wait_for_selector(site::JOB_CARD_SELECTOR, selector_timeout)
        .await?
    {
        WaitOutcome::Visible => {}
        WaitOutcome::TimedOut => {
            // The wall sometimes appears only after the initial response, so
            // a timed-out wait gets re-checked against the location before it
            // can count as an empty page.
            let location = page.current_location().await?;
            if site::is_soft_wall(&location) {
                return Err(ShigotoError::SoftWall { location });
            }
            tracing::debug!(
                "No job cards for {} page {}; treating as end of results",
                query,
                page_index
            );
            return Ok(Extraction {
                records: Vec::new(),
                skipped: 0,
            });
        }
    }

    let html = page.dom_snapshot().await?;
    Ok(extract_records(&html, vocabulary, scrape_date))
}
