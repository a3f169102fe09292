//! SQLite sink
//!
//! Persists records into a jobs table keyed by posting URL. Re-crawling the
//! same posting updates the row in place, so repeated runs converge instead
//! of duplicating.

use crate::output::traits::{PageResult, Sink, SinkResult};
use rusqlite::{params, Connection};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS jobs (
        url             TEXT PRIMARY KEY,
        source_id       TEXT NOT NULL,
        title           TEXT NOT NULL,
        company         TEXT NOT NULL,
        company_url     TEXT NOT NULL,
        city            TEXT NOT NULL,
        img             TEXT NOT NULL,
        remote_ok       INTEGER NOT NULL,
        posted_date     TEXT NOT NULL,
        scrape_date     TEXT NOT NULL,
        salary_min      REAL NOT NULL,
        salary_max      REAL NOT NULL,
        salary_currency TEXT NOT NULL,
        description     TEXT NOT NULL,
        tags            TEXT NOT NULL,
        search_text     TEXT NOT NULL,
        search_location TEXT NOT NULL,
        page_index      INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_jobs_company ON jobs(company);
    CREATE INDEX IF NOT EXISTS idx_jobs_posted_date ON jobs(posted_date);
";

/// Sink upserting records into a SQLite database.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Opens or creates the database at `path`.
    pub fn new(path: &Path) -> SinkResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    fn count(&self) -> i64 {
        self.conn
            .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))
            .unwrap()
    }
}

impl Sink for SqliteSink {
    fn accept(&mut self, result: PageResult) -> SinkResult<()> {
        let tx = self.conn.transaction()?;
        for record in &result.records {
            let tags = serde_json::to_string(&record.tags)?;
            tx.execute(
                "INSERT INTO jobs (
                    url, source_id, title, company, company_url, city, img,
                    remote_ok, posted_date, scrape_date, salary_min, salary_max,
                    salary_currency, description, tags, search_text,
                    search_location, page_index
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
                 ON CONFLICT(url) DO UPDATE SET
                    source_id = excluded.source_id,
                    title = excluded.title,
                    company = excluded.company,
                    company_url = excluded.company_url,
                    city = excluded.city,
                    img = excluded.img,
                    remote_ok = excluded.remote_ok,
                    posted_date = excluded.posted_date,
                    scrape_date = excluded.scrape_date,
                    salary_min = excluded.salary_min,
                    salary_max = excluded.salary_max,
                    salary_currency = excluded.salary_currency,
                    description = excluded.description,
                    tags = excluded.tags,
                    search_text = excluded.search_text,
                    search_location = excluded.search_location,
                    page_index = excluded.page_index",
                params![
                    record.url,
                    record.id,
                    record.title,
                    record.company,
                    record.company_url,
                    record.city,
                    record.img,
                    record.remote_ok,
                    record.posted_date.to_string(),
                    record.date.to_string(),
                    record.salary_min,
                    record.salary_max,
                    record.salary_currency,
                    record.description,
                    tags,
                    result.query.text,
                    result.query.location,
                    result.page_index,
                ],
            )?;
        }
        tx.commit()?;
        tracing::debug!(
            "Stored {} records for {} page {}",
            result.records.len(),
            result.query,
            result.page_index
        );
        Ok(())
    }
}
