//! PDF archive download from the downloads page. The only routine with a
//! filesystem side effect or binary payload.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::info;
use url::Url;

use crate::constants::MAIN_DOC_URL;
use crate::dom::{find_tag, AttrFilter};
use crate::error::{Result, ScrapeError};
use crate::fetch::Fetch;

static PDF_A4_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".+pdf-a4\.zip$").unwrap());

/// Locate the A4 PDF zip link in the documentation table, resolve it, and
/// write the archive under `dest_dir` named after the URL's final path
/// segment. Returns the written path.
pub fn download(fetcher: &impl Fetch, dest_dir: &Path) -> Result<PathBuf> {
    let downloads_url = Url::parse(MAIN_DOC_URL)?.join("download.html")?;
    let page = fetcher.fetch_text(&downloads_url)?;
    let doc = Html::parse_document(&page.html);

    let main_tag = find_tag(doc.root_element(), "div", &[AttrFilter::Exact("role", "main")])?;
    let table_tag = find_tag(main_tag, "table", &[AttrFilter::Class("docutils")])?;
    let pdf_a4_tag = find_tag(table_tag, "a", &[AttrFilter::Matches("href", &PDF_A4_RE)])?;

    // The href filter just matched, so the attribute is present.
    let href = pdf_a4_tag.value().attr("href").unwrap();
    let archive_url = downloads_url.join(href)?;

    let filename = archive_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| ScrapeError::InvalidArchiveUrl {
            url: archive_url.to_string(),
        })?
        .to_string();

    fs::create_dir_all(dest_dir)?;
    let archive_path = dest_dir.join(&filename);

    let body = fetcher.fetch_bytes(&archive_url)?;
    fs::write(&archive_path, body)?;

    info!("Archive downloaded and saved to {}", archive_path.display());
    Ok(archive_path)
}
