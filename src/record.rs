//! The structured job record extracted from a listing page
//!
//! One `JobRecord` per job card. Records are created by the extractor,
//! optionally enriched in place with a long-form description, and handed to
//! the sinks; the engine keeps no copy afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single extracted job posting.
///
/// Field names serialize in camelCase so the JSON sink output matches the
/// shape downstream consumers of the feed already expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Source-side entity identifier. Empty when the attribute is absent.
    pub id: String,

    /// Posting title.
    pub title: String,

    /// Company display name.
    pub company: String,

    /// Company profile URL. Empty when the subtitle carries no link.
    pub company_url: String,

    /// Posting URL. Required; an item without one is rejected.
    pub url: String,

    /// Free-form location text shown on the card.
    pub city: String,

    /// Company logo URL. Empty when not present.
    pub img: String,

    /// Heuristic: the title mentions remote work or the absence of an office.
    pub remote_ok: bool,

    /// Calendar date the posting went up.
    pub posted_date: NaiveDate,

    /// Calendar date this record was scraped.
    pub date: NaiveDate,

    /// Lower salary bound, or -1.0 when not determined.
    pub salary_min: f64,

    /// Upper salary bound, or -1.0 when not determined.
    pub salary_max: f64,

    /// "EUR", "USD", "GBP", or empty when no recognized symbol led the blob.
    pub salary_currency: String,

    /// Long-form description HTML. Empty until the description fetcher runs.
    #[serde(default)]
    pub description: String,

    /// Lowercase vocabulary tokens found in the title or URL, first-seen
    /// order, no duplicates.
    pub tags: Vec<String>,
}

/// Sentinel meaning "salary bound not determined".
pub const SALARY_UNKNOWN: f64 = -1.0;

impl JobRecord {
    /// True when neither salary bound was parsed.
    pub fn salary_unknown(&self) -> bool {
        self.salary_min == SALARY_UNKNOWN && self.salary_max == SALARY_UNKNOWN
    }
}
