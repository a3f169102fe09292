//! Long-form description fetching
//!
//! Visits a posting's detail page with the shared page handle and pulls the
//! description container's inner HTML. Never fails outward: after the retry
//! budget is exhausted the record simply keeps an empty description and the
//! error stays in the logs. The next listing fetch starts with its own
//! navigation, so borrowing the handle here leaks no state into pagination.

use crate::page::{PageCapability, WaitUntil};
use crate::scrape::backoff::{classify, RetryAction, RetryPolicy};
use crate::{site, Result, ShigotoError};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(site::DESCRIPTION_SELECTOR).expect("description selector"));

/// Fetches the description HTML for one posting URL, retrying per `policy`.
///
/// Returns the empty string on any terminal failure or cancellation.
pub async fn fetch_description<P: PageCapability + ?Sized>(
    page: &P,
    url: &str,
    headers: &HashMap<String, String>,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> String {
    let mut attempt = 1u32;
    loop {
        match try_fetch(page, url, headers).await {
            Ok(description) => return description,
            Err(error) => match classify(&error, attempt, policy) {
                RetryAction::RetryAfter(delay) => {
                    tracing::info!(
                        "Description fetch attempt {} for {} failed ({}); retrying in {:?}",
                        attempt,
                        url,
                        error,
                        delay
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return String::new(),
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                RetryAction::Fail => {
                    tracing::warn!("Giving up on description for {}: {}", url, error);
                    return String::new();
                }
            },
        }
    }
}

/// One attempt: navigate, check for rate limiting and the soft wall, then
/// read the description container from a snapshot.
async fn try_fetch<P: PageCapability + ?Sized>(
    page: &P,
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<String> {
    page.set_request_headers(headers).await?;

    let response = page.navigate(url, WaitUntil::NetworkSettled).await?;
    if response.status == 429 {
        return Err(ShigotoError::RateLimited {
            status: 429,
            url: url.to_string(),
        });
    }

    let location = page.current_location().await?;
    if site::is_soft_wall(&location) {
        return Err(ShigotoError::SoftWall { location });
    }

    let html = page.dom_snapshot().await?;
    let document = Html::parse_document(&html);
    Ok(document
        .select(&DESCRIPTION)
        .next()
        .map(|el| el.inner_html())
        .unwrap_or_default())
}
