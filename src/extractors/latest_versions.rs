//! Version/status listing from the documentation front page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::constants::MAIN_DOC_URL;
use crate::error::{Result, ScrapeError};
use crate::extractors::Row;
use crate::fetch::Fetch;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").unwrap());

/// One row per anchor in the "All versions" list whose text looks like
/// `Python <major>.<minor> (<status>)`. Navigational anchors are silently
/// dropped. No such list at all is a semantic absence, distinct from a
/// missing tag.
pub fn latest_versions(fetcher: &impl Fetch) -> Result<Vec<Row>> {
    let doc_url = Url::parse(MAIN_DOC_URL)?;
    let page = fetcher.fetch_text(&doc_url)?;
    let doc = Html::parse_document(&page.html);

    let ul_sel = Selector::parse("ul").unwrap();
    let a_sel = Selector::parse("a").unwrap();

    let version_list = doc
        .root_element()
        .select(&ul_sel)
        .find(|ul| ul.text().collect::<String>().contains("All versions"))
        .ok_or_else(|| ScrapeError::VersionsNotFound {
            url: doc_url.to_string(),
        })?;

    let mut results = vec![vec![
        "Link".to_string(),
        "Version".to_string(),
        "Status".to_string(),
    ]];
    for a_tag in version_list.select(&a_sel) {
        let Some(href) = a_tag.value().attr("href") else {
            continue;
        };
        let text = a_tag.text().collect::<String>();
        if let Some(caps) = VERSION_RE.captures(&text) {
            results.push(vec![
                href.to_string(),
                caps["version"].to_string(),
                caps["status"].to_string(),
            ]);
        }
    }

    Ok(results)
}
