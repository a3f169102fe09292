//! Shigoto: a job-board crawl engine
//!
//! This crate drives one rendered browser page through a paginated job-listing
//! site, walking the cross product of search terms and locations, extracting
//! structured job records and handing them to configurable sinks. It copes
//! with rate limiting, soft authentication walls, and transient navigation
//! failures via a linear-backoff retry classifier.

pub mod config;
pub mod extract;
pub mod output;
pub mod page;
pub mod record;
pub mod scrape;
pub mod site;

use thiserror::Error;

/// Main error type for shigoto operations
#[derive(Debug, Error)]
pub enum ShigotoError {
    #[error("Rate limited (HTTP {status}) at {url}")]
    RateLimited { status: u16, url: String },

    #[error("Soft authentication wall at {location}")]
    SoftWall { location: String },

    #[error("Timed out waiting for selector '{selector}'")]
    SelectorTimeout { selector: String },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Failed to capture page snapshot: {0}")]
    Snapshot(String),

    #[error("Page capability unusable: {0}")]
    Infrastructure(String),
}

impl ShigotoError {
    /// Returns true for conditions that mark themselves as worth retrying:
    /// rate limiting and soft-wall detection. A bare selector timeout is not
    /// retryable (it degrades to an empty page unless a soft wall is found),
    /// and infrastructure faults are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::SoftWall { .. })
    }

    /// The HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimited { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for shigoto operations
pub type Result<T> = std::result::Result<T, ShigotoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{PageResult, Sink};
pub use record::JobRecord;
pub use scrape::SearchQuery;
