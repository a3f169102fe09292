//! Record extraction from rendered listing pages
//!
//! Extraction is a pure function over a serialized DOM snapshot: the page
//! capability hands over HTML, and everything here runs outside the browser
//! with the tag vocabulary passed in explicitly. Faults are isolated per
//! job card; one malformed card never costs the rest of the page.

mod dates;
mod records;
mod salary;
mod tags;

pub use dates::parse_posted_date;
pub use records::{extract_records, Extraction};
pub use salary::{parse_salary, ParsedSalary};
pub use tags::extract_tags;
