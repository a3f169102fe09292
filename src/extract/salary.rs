//! Salary blob parsing
//!
//! Cards carry salary as display text, e.g.
//! `<span class="job-search-card__salary-info">$65,000.00 - $90,000.00</span>`.
//! A currency symbol from a closed set leads the blob; up to two numeric
//! groups (US-style thousands separators) give the bounds.

use crate::record::SALARY_UNKNOWN;
use once_cell::sync::Lazy;
use regex::Regex;

/// A run of digits possibly continued by commas and dots.
static NUMBER_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9][0-9,.]*").expect("salary number pattern"));

/// Parsed salary bounds with the -1 sentinel for "not determined".
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSalary {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

impl ParsedSalary {
    fn unknown() -> Self {
        Self {
            min: SALARY_UNKNOWN,
            max: SALARY_UNKNOWN,
            currency: String::new(),
        }
    }
}

/// Parses a salary text blob; `None` (element absent) yields both sentinels.
///
/// A zero bound is a legitimate parsed value and is kept distinct from the
/// sentinel. When both bounds parse in reverse order they are swapped so
/// `min <= max` always holds.
pub fn parse_salary(text: Option<&str>) -> ParsedSalary {
    let Some(text) = text else {
        return ParsedSalary::unknown();
    };
    let text = text.trim();

    let currency = match text.chars().next() {
        Some('€') => "EUR",
        Some('$') => "USD",
        Some('£') => "GBP",
        _ => "",
    }
    .to_string();

    let mut bounds = NUMBER_GROUP
        .find_iter(text)
        .take(2)
        .filter_map(|m| m.as_str().replace(',', "").parse::<f64>().ok());

    let mut min = bounds.next().unwrap_or(SALARY_UNKNOWN);
    let mut max = bounds.next().unwrap_or(SALARY_UNKNOWN);

    if min != SALARY_UNKNOWN && max != SALARY_UNKNOWN && min > max {
        std::mem::swap(&mut min, &mut max);
    }

    ParsedSalary { min, max, currency }
}
