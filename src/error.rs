use thiserror::Error;

/// Failure channel shared by the fetcher, the tag locator and the extractors.
///
/// Extractors decide skip-vs-abort per call site: a failed sub-fetch inside a
/// multi-item scan is warned and skipped, a failed top-level fetch or a
/// missing tag aborts the extractor.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure or non-success HTTP status.
    #[error("request for {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("http client setup failed: {0}")]
    ClientSetup(#[source] reqwest::Error),

    /// Structural absence: an expected tag is missing from the page.
    #[error("tag <{tag}> not found (filter: {filter})")]
    TagNotFound { tag: String, filter: String },

    /// Semantic absence: the page parsed fine but carries no version list.
    #[error("no \"All versions\" list found on {url}")]
    VersionsNotFound { url: String },

    /// The archive link resolved to a URL without a usable file name.
    #[error("archive url {url} has no final path segment")]
    InvalidArchiveUrl { url: String },

    #[error("http cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
