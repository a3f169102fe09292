//! Technology tag extraction
//!
//! Tokens come from two places: the whitespace-split title and the
//! hyphen-split posting URL. A token survives when its lowercase form is in
//! the supplied vocabulary; the result keeps first-seen order with no
//! duplicates.

use std::collections::HashSet;

/// Extracts vocabulary tags from a posting's title and URL.
pub fn extract_tags(title: &str, url: &str, vocabulary: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for token in title.split_whitespace().chain(url.split('-')) {
        if token.is_empty() {
            continue;
        }
        let lower = token.to_lowercase();
        if vocabulary.contains(&lower) && seen.insert(lower.clone()) {
            tags.push(lower);
        }
    }

    tags
}
