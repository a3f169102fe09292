//! Job-board site specifics
//!
//! URL construction and the markers that identify this portal's rate limits
//! and authentication interstitials. Everything the rest of the engine knows
//! about the concrete site lives here.

use crate::scrape::SearchQuery;

/// Guest search endpoint returning one page of job cards as an HTML fragment.
const LISTING_ENDPOINT: &str =
    "https://linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// Path fragment that identifies the login interstitial. The portal answers
/// HTTP 200 on these redirects, so detection goes through the page location.
const SOFT_WALL_MARKER: &str = "linkedin.com/authwall";

/// Selector for one job card on a listing page.
pub const JOB_CARD_SELECTOR: &str = ".job-search-card";

/// Selector for the description container on a posting's detail page.
pub const DESCRIPTION_SELECTOR: &str = ".show-more-less-html__markup";

/// Number of job cards per listing page; page N starts at offset N * PAGE_SIZE.
pub const PAGE_SIZE: u32 = 25;

/// Builds the listing URL for one page of a search query.
///
/// An empty location means "no location filter" and is omitted from the
/// query string entirely.
pub fn listing_url(query: &SearchQuery, page_index: u32) -> String {
    let mut url = format!(
        "{}?keywords={}&start={}",
        LISTING_ENDPOINT,
        query.text,
        page_index * PAGE_SIZE
    );
    if !query.location.is_empty() {
        url.push_str("&location=");
        url.push_str(&query.location);
    }
    url
}

/// True when the given page location is the authentication interstitial.
pub fn is_soft_wall(location: &str) -> bool {
    location.contains(SOFT_WALL_MARKER)
}
