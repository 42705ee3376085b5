//! Release notes listing from the "What's New" index.

use indicatif::ProgressBar;
use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

use crate::constants::MAIN_DOC_URL;
use crate::dom::{find_tag, text_of, AttrFilter};
use crate::error::Result;
use crate::extractors::Row;
use crate::fetch::Fetch;

/// One row per version entry on the index: the article link, its `<h1>`
/// title, and the first definition list (editor/author block) with embedded
/// newlines collapsed to spaces. A sub-page whose fetch fails is warned and
/// skipped; a missing index structure aborts.
pub fn whats_new(fetcher: &impl Fetch) -> Result<Vec<Row>> {
    let whats_new_url = Url::parse(MAIN_DOC_URL)?.join("whatsnew/")?;
    let page = fetcher.fetch_text(&whats_new_url)?;
    let doc = Html::parse_document(&page.html);

    let main_section = find_tag(
        doc.root_element(),
        "section",
        &[AttrFilter::Exact("id", "what-s-new-in-python")],
    )?;
    let toc = find_tag(main_section, "div", &[AttrFilter::Class("toctree-wrapper")])?;

    let entry_sel = Selector::parse("li.toctree-l1").unwrap();
    let a_sel = Selector::parse("a").unwrap();
    let entries: Vec<_> = toc.select(&entry_sel).collect();

    let mut results = vec![vec![
        "Article link".to_string(),
        "Title".to_string(),
        "Editor, author".to_string(),
    ]];

    let pb = ProgressBar::new(entries.len() as u64);
    for entry in entries {
        pb.inc(1);
        let Some(href) = entry
            .select(&a_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let version_link = whats_new_url.join(href)?;

        let sub_page = match fetcher.fetch_text(&version_link) {
            Ok(page) => page,
            Err(e) => {
                warn!("Skipping {}: {}", version_link, e);
                continue;
            }
        };
        let sub_doc = Html::parse_document(&sub_page.html);

        let h1 = find_tag(sub_doc.root_element(), "h1", &[])?;
        let dl = find_tag(sub_doc.root_element(), "dl", &[])?;
        let dl_text = dl
            .text()
            .collect::<String>()
            .replace('\n', " ")
            .trim()
            .to_string();

        results.push(vec![version_link.to_string(), text_of(h1), dl_text]);
    }
    pb.finish_and_clear();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::extractors::testutil::{fixture, StubFetch};

    const INDEX_URL: &str = "https://docs.python.org/3/whatsnew/";

    fn stub_with_index() -> StubFetch {
        StubFetch::new().page(INDEX_URL, fixture("whats_new_index.html"))
    }

    #[test]
    fn header_plus_one_row_per_entry() {
        let stub = stub_with_index()
            .page(
                "https://docs.python.org/3/whatsnew/3.13.html",
                fixture("whats_new_3.13.html"),
            )
            .page(
                "https://docs.python.org/3/whatsnew/3.12.html",
                fixture("whats_new_3.12.html"),
            );

        let rows = whats_new(&stub).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "Article link");
        assert_eq!(rows[1][0], "https://docs.python.org/3/whatsnew/3.13.html");
        assert_eq!(rows[1][1], "What's New In Python 3.13");
        assert!(rows[1][2].contains("Thomas Wouters"));
        assert!(!rows[1][2].contains('\n'), "newlines must be collapsed");
        assert_eq!(rows[2][1], "What's New In Python 3.12");
    }

    #[test]
    fn failed_sub_fetch_is_skipped_not_fatal() {
        let stub = stub_with_index()
            .page(
                "https://docs.python.org/3/whatsnew/3.13.html",
                fixture("whats_new_3.13.html"),
            )
            .failing("https://docs.python.org/3/whatsnew/3.12.html");

        let rows = whats_new(&stub).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "What's New In Python 3.13");
    }

    #[test]
    fn missing_index_section_aborts() {
        let stub = StubFetch::new().page(INDEX_URL, "<html><body><p>nope</p></body></html>");
        let err = whats_new(&stub).unwrap_err();
        assert!(matches!(err, ScrapeError::TagNotFound { .. }));
    }

    #[test]
    fn failed_index_fetch_aborts() {
        let stub = StubFetch::new().failing(INDEX_URL);
        let err = whats_new(&stub).unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch { .. }));
    }
}
