//! JSON file sink
//!
//! Writes one pretty-printed JSON file per emitted page, named after the
//! query and page number, into a flat data directory.

use crate::output::traits::{PageResult, Sink, SinkResult};
use std::fs;
use std::path::PathBuf;

/// Sink writing each page's records as a JSON array file.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    /// Creates the data directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> SinkResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn file_name(result: &PageResult) -> String {
        format!(
            "jobs_{}_{}_{}.json",
            sanitize(&result.query.text),
            sanitize(&result.query.location),
            result.page_index
        )
    }
}

impl Sink for JsonFileSink {
    fn accept(&mut self, result: PageResult) -> SinkResult<()> {
        let path = self.dir.join(Self::file_name(&result));
        let json = serde_json::to_string_pretty(&result.records)?;
        fs::write(&path, json)?;
        tracing::debug!("Wrote {} records to {}", result.records.len(), path.display());
        Ok(())
    }
}

/// Keeps file names portable: anything outside [A-Za-z0-9_-] becomes '-'.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
