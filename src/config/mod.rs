//! Configuration module for shigoto
//!
//! Loading, parsing and validating TOML configuration files. Every key has a
//! shipped default, so a missing or empty file still yields a usable crawl.
//! The static search-space and vocabulary tables live here as defaults and
//! are immutable for the life of the process.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, RequestConfig, RetryConfig, SearchConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
