//! Posted-date parsing

use chrono::NaiveDate;

/// Parses the `YYYY-MM-DD` date embedded in a card's datetime attribute.
pub fn parse_posted_date(datetime: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(datetime.trim(), "%Y-%m-%d").ok()
}
