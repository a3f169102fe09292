//! Search-space enumeration
//!
//! The crawl walks every combination of location filter and technology
//! term. Enumeration is finite and deterministic: locations are the outer
//! dimension and technologies the inner one, matching the declared list
//! orders, and the orchestrator consumes the sequence strictly in order.

use serde::{Deserialize, Serialize};

/// One cell of the search-space cross product. Value equality; immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The technology or role term.
    pub text: String,

    /// The location filter; empty means no filter.
    pub location: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: location.into(),
        }
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.location.is_empty() {
            write!(f, "'{}' (anywhere)", self.text)
        } else {
            write!(f, "'{}' in {}", self.text, self.location)
        }
    }
}

/// Enumerates the full cross product, locations outer, technologies inner.
pub fn search_space(locations: &[String], technologies: &[String]) -> Vec<SearchQuery> {
    let mut queries = Vec::with_capacity(locations.len() * technologies.len());
    for location in locations {
        for technology in technologies {
            queries.push(SearchQuery::new(technology.clone(), location.clone()));
        }
    }
    queries
}
