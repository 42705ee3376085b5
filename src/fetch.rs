//! HTTP fetching through the response cache.
//!
//! All page loads go through [`Fetch`] so extractors get a single explicit
//! failure channel and tests can substitute a canned fetcher.

use reqwest::blocking::Client;
use rusqlite::Connection;
use tracing::debug;
use url::Url;

use crate::cache;
use crate::error::{Result, ScrapeError};

/// One fetched document. Decoded as UTF-8 regardless of the server-declared
/// charset; the source site is UTF-8 and this avoids mojibake on
/// misconfigured responses.
pub struct Page {
    pub url: Url,
    pub html: String,
}

pub trait Fetch {
    fn fetch_text(&self, url: &Url) -> Result<Page>;
    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Blocking reqwest client backed by the SQLite response cache.
pub struct CachedClient {
    client: Client,
    conn: Connection,
}

impl CachedClient {
    pub fn new(conn: Connection) -> Result<Self> {
        cache::init_schema(&conn)?;
        let client = Client::builder()
            .user_agent(concat!("pydocs_scraper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ScrapeError::ClientSetup)?;
        Ok(Self { client, conn })
    }

    pub fn clear_cache(&self) -> Result<()> {
        cache::clear(&self.conn)
    }

    fn get_cached(&self, url: &Url) -> Result<Vec<u8>> {
        if let Some(body) = cache::get(&self.conn, url.as_str())? {
            debug!("Cache hit: {}", url);
            return Ok(body);
        }

        let fetch_err = |source: reqwest::Error| ScrapeError::Fetch {
            url: url.to_string(),
            source: source.into(),
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        let body = response.bytes().map_err(fetch_err)?.to_vec();

        cache::put(&self.conn, url.as_str(), &body)?;
        Ok(body)
    }
}

impl Fetch for CachedClient {
    fn fetch_text(&self, url: &Url) -> Result<Page> {
        let body = self.get_cached(url)?;
        Ok(Page {
            url: url.clone(),
            html: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        self.get_cached(url)
    }
}
