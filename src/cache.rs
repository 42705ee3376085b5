//! On-disk HTTP response cache: one SQLite table keyed by URL.
//!
//! Shared across runs; extractors never touch it directly. `--clear-cache`
//! wipes it before the run starts.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::error::Result;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS responses (
            url        TEXT PRIMARY KEY,
            body       BLOB NOT NULL,
            fetched_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

pub fn get(conn: &Connection, url: &str) -> Result<Option<Vec<u8>>> {
    let body = conn
        .query_row("SELECT body FROM responses WHERE url = ?1", [url], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(body)
}

pub fn put(conn: &Connection, url: &str, body: &[u8]) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO responses (url, body) VALUES (?1, ?2)",
        rusqlite::params![url, body],
    )?;
    Ok(())
}

pub fn clear(conn: &Connection) -> Result<()> {
    let removed = conn.execute("DELETE FROM responses", [])?;
    info!("Cleared HTTP cache ({} cached responses removed)", removed);
    Ok(())
}
