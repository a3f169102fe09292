//! Job card extraction
//!
//! Walks the job cards of one rendered listing page and pulls a
//! [`JobRecord`] out of each. Required fields are the title, posting URL,
//! company, location and posted-date marker; anything else degrades to an
//! empty value. A card that fails to yield its required fields is skipped
//! and counted, never propagated.

use crate::extract::dates::parse_posted_date;
use crate::extract::salary::parse_salary;
use crate::extract::tags::extract_tags;
use crate::record::JobRecord;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("item selector"));
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".base-search-card__title").expect("title selector"));
static LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.base-card__full-link").expect("link selector"));
static LINK_FALLBACK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".base-search-card--link").expect("link fallback selector"));
static SUBTITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".base-search-card__subtitle").expect("subtitle selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("anchor selector"));
static LOCATION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".job-search-card__location").expect("location selector"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("img selector"));
static LISTDATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".job-search-card__listdate").expect("listdate selector"));
static LISTDATE_NEW: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".job-search-card__listdate--new").expect("listdate-new selector")
});
static SALARY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".job-search-card__salary-info").expect("salary selector"));
static ENTITY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[data-entity-urn]").expect("entity selector"));

/// Remote-work heuristic over the title. Not a guarantee.
static REMOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)remote|no office location").expect("remote pattern"));

/// Result of extracting one listing page.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Successfully extracted records, in card order.
    pub records: Vec<JobRecord>,

    /// Number of cards skipped because a required field was missing or
    /// malformed.
    pub skipped: u32,
}

/// Extracts every job card from a listing-page DOM snapshot.
///
/// `vocabulary` is the lowercase tag vocabulary, passed explicitly since the
/// snapshot crossed the rendering boundary and carries no shared context.
pub fn extract_records(html: &str, vocabulary: &[String], scrape_date: NaiveDate) -> Extraction {
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    let mut skipped = 0u32;

    for (index, item) in document.select(&ITEM).enumerate() {
        match extract_card(item, vocabulary, scrape_date) {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                tracing::warn!("Skipping job card {}: {}", index, reason);
            }
        }
    }

    Extraction { records, skipped }
}

/// Pulls one record out of a single job card element.
fn extract_card(
    item: ElementRef<'_>,
    vocabulary: &[String],
    scrape_date: NaiveDate,
) -> Result<JobRecord, String> {
    let title = select_text(item, &TITLE).ok_or("missing title")?;

    let url = item
        .select(&LINK)
        .next()
        .or_else(|| item.select(&LINK_FALLBACK).next())
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
        .ok_or("missing posting url")?;
    let parsed = Url::parse(&url).map_err(|_| format!("invalid posting url '{url}'"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("posting url has scheme '{}'", parsed.scheme()));
    }

    let subtitle = item.select(&SUBTITLE).next().ok_or("missing company")?;
    let company = collect_text(subtitle);
    if company.is_empty() {
        return Err("empty company name".to_string());
    }
    let company_url = subtitle
        .select(&ANCHOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .unwrap_or_default()
        .to_string();

    let city = select_text(item, &LOCATION).ok_or("missing location")?;

    let posted_date = if let Some(el) = item.select(&LISTDATE).next() {
        let datetime = el
            .value()
            .attr("datetime")
            .ok_or("posted date missing datetime attribute")?;
        parse_posted_date(datetime)
            .ok_or_else(|| format!("unparseable posted date '{datetime}'"))?
    } else if let Some(el) = item.select(&LISTDATE_NEW).next() {
        // Posted less than a day ago. The marker carries no finer precision,
        // so this collapses to the scrape date.
        el.value()
            .attr("datetime")
            .and_then(parse_posted_date)
            .unwrap_or(scrape_date)
    } else {
        return Err("missing posted date".to_string());
    };

    let img = item
        .select(&IMG)
        .next()
        .and_then(|el| el.value().attr("data-delayed-url"))
        .unwrap_or_default()
        .to_string();

    let id = item
        .select(&ENTITY)
        .next()
        .and_then(|el| el.value().attr("data-entity-urn"))
        .unwrap_or_default()
        .to_string();

    let salary_text = item.select(&SALARY).next().map(collect_text);
    let salary = parse_salary(salary_text.as_deref());

    let remote_ok = REMOTE.is_match(&title);
    let tags = extract_tags(&title, &url, vocabulary);

    Ok(JobRecord {
        id,
        title,
        company,
        company_url,
        url,
        city,
        img,
        remote_ok,
        posted_date,
        date: scrape_date,
        salary_min: salary.min,
        salary_max: salary.max,
        salary_currency: salary.currency,
        description: String::new(),
        tags,
    })
}

/// Trimmed text content of the first element matching `selector`, if any and
/// non-empty.
fn select_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(collect_text)
        .filter(|s| !s.is_empty())
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
