use crate::config::types::{Config, CrawlerConfig, OutputConfig, RetryConfig, SearchConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_retry_config(&config.retry)?;
    validate_search_config(&config.search)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.selector_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "selector-timeout-ms must be >= 100ms, got {}ms",
            config.selector_timeout_ms
        )));
    }
    Ok(())
}

fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.description_max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "description-max-attempts must be >= 1, got {}",
            config.description_max_attempts
        )));
    }

    if config.base_delay_ms < 1 {
        return Err(ConfigError::Validation(
            "base-delay-ms must be >= 1ms".to_string(),
        ));
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.locations.is_empty() {
        return Err(ConfigError::Validation(
            "locations cannot be empty; use [\"\"] for an unfiltered search".to_string(),
        ));
    }

    if config.technologies.is_empty() {
        return Err(ConfigError::Validation(
            "technologies cannot be empty".to_string(),
        ));
    }

    if config.technologies.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "technologies cannot contain empty entries".to_string(),
        ));
    }

    if config.tags.is_empty() {
        return Err(ConfigError::Validation(
            "tags vocabulary cannot be empty".to_string(),
        ));
    }

    // The extractor compares lowercased tokens against the vocabulary, so an
    // uppercase entry could never match anything.
    for tag in &config.tags {
        if tag.trim().is_empty() || *tag != tag.to_lowercase() {
            return Err(ConfigError::Validation(format!(
                "tag vocabulary entries must be non-empty and lowercase, got '{tag}'"
            )));
        }
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_none() && config.database_path.is_none() {
        return Err(ConfigError::Validation(
            "at least one of data-dir and database-path must be set".to_string(),
        ));
    }

    if let Some(dir) = &config.data_dir {
        if dir.is_empty() {
            return Err(ConfigError::Validation("data-dir cannot be empty".to_string()));
        }
    }

    if let Some(path) = &config.database_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "database-path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
