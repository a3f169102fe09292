use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::scrape::RetryPolicy;

/// Main configuration structure for shigoto
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// How long to wait for the listing selector before concluding the page
    /// is empty (milliseconds)
    #[serde(rename = "selector-timeout-ms", default = "default_selector_timeout_ms")]
    pub selector_timeout_ms: u64,

    /// Whether to visit each posting and pull its long-form description
    #[serde(rename = "fetch-descriptions", default)]
    pub fetch_descriptions: bool,

    /// Whether the browser runs headless
    #[serde(default = "default_headless")]
    pub headless: bool,
}

/// Retry and backoff configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Attempt ceiling for listing-page fetches
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay for linear backoff; attempt N waits N times this
    #[serde(rename = "base-delay-ms", default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Status codes that are never retried
    #[serde(rename = "excluded-status-codes", default)]
    pub excluded_status_codes: Vec<u16>,

    /// Attempt ceiling for description fetches
    #[serde(rename = "description-max-attempts", default = "default_max_attempts")]
    pub description_max_attempts: u32,
}

/// Extra request headers applied to the page
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    /// Language preference sent with every request
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

/// The search space and tag vocabulary
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Location filters; the empty string means "no location filter"
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,

    /// Technology / role query terms
    #[serde(default = "default_technologies")]
    pub technologies: Vec<String>,

    /// Lowercase tag vocabulary used by the extractor
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

/// Output sink configuration; at least one sink must be set
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one JSON file per emitted page of results
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: Option<String>,

    /// Path to the SQLite jobs database
    #[serde(rename = "database-path", default)]
    pub database_path: Option<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            selector_timeout_ms: default_selector_timeout_ms(),
            fetch_descriptions: false,
            headless: default_headless(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            excluded_status_codes: Vec::new(),
            description_max_attempts: default_max_attempts(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            accept_language: default_accept_language(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            technologies: default_technologies(),
            tags: default_tags(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_path: None,
        }
    }
}

impl RetryConfig {
    /// Policy for listing-page fetches.
    pub fn listing_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            excluded_status_codes: self.excluded_status_codes.clone(),
        }
    }

    /// Policy for description fetches; a separate, usually smaller budget.
    pub fn description_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.description_max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            excluded_status_codes: self.excluded_status_codes.clone(),
        }
    }
}

impl RequestConfig {
    /// The header map applied to the page before navigating.
    pub fn headers(&self) -> HashMap<String, String> {
        HashMap::from([("accept-language".to_string(), self.accept_language.clone())])
    }
}

fn default_selector_timeout_ms() -> u64 {
    5000
}

fn default_headless() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    4
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_data_dir() -> Option<String> {
    Some("data".to_string())
}

/// Location filters shipped with the crawler. The leading empty string is
/// the "anywhere" search.
fn default_locations() -> Vec<String> {
    [
        "",
        "Spain",
        "France",
        "Germany",
        "Belgium",
        "Italy",
        "United Kingdom",
        "Ireland",
        "United States",
        "Canada",
        "Denmark",
        "Norway",
        "Sweden",
        "Finland",
        "Estonia",
        "Romania",
        "Switzerland",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Technology and role query terms shipped with the crawler.
fn default_technologies() -> Vec<String> {
    [
        "Angular",
        "React",
        "Vue",
        "Javascript",
        "Typescript",
        "Python",
        "Django",
        "Ruby on rails",
        "Svelte",
        "Wordpress",
        "Ionic",
        "Solidity",
        "Laravel",
        "Frontend",
        "Backend",
        "Full stack",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Lowercase tag vocabulary matched against titles and posting URLs.
fn default_tags() -> Vec<String> {
    [
        "angular", "react", "vue", "svelte", "javascript", "typescript", "node", "python",
        "django", "rails", "ruby", "php", "laravel", "wordpress", "ionic", "solidity", "java",
        "kotlin", "swift", "rust", "go", "frontend", "backend", "fullstack", "devops", "aws",
        "docker", "kubernetes", "sql", "graphql",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
