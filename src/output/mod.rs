//! Output sinks for crawl results
//!
//! One JSON file per emitted page, a SQLite jobs database, or both at once.
//! The engine only ever sees the [`Sink`] trait.

mod json_files;
mod multi;
mod sqlite;
mod traits;

pub use json_files::JsonFileSink;
pub use multi::MultiSink;
pub use sqlite::SqliteSink;
pub use traits::{PageResult, Sink, SinkError, SinkResult};

use crate::config::OutputConfig;
use std::path::Path;

/// Builds the sink stack described by the output configuration.
///
/// Validation guarantees at least one sink is configured; a single sink is
/// returned bare, two are wrapped in a [`MultiSink`].
pub fn build_sink(config: &OutputConfig) -> SinkResult<Box<dyn Sink>> {
    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

    if let Some(dir) = &config.data_dir {
        sinks.push(Box::new(JsonFileSink::new(dir)?));
    }
    if let Some(path) = &config.database_path {
        sinks.push(Box::new(SqliteSink::new(Path::new(path))?));
    }

    if sinks.len() == 1 {
        Ok(sinks.remove(0))
    } else {
        Ok(Box::new(MultiSink::new(sinks)))
    }
}
