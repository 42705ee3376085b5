//! PEP status tally: the category index cross-checked against each PEP page.

use indicatif::ProgressBar;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::constants::PEP_LIST_URL;
use crate::dom::{find_tag, text_of, AttrFilter};
use crate::error::Result;
use crate::extractors::Row;
use crate::fetch::Fetch;
use crate::status::{expected_statuses, reconcile};

/// Count PEPs per confirmed status. Each index row carries a two-character
/// type/status abbreviation; the second character is the status code, empty
/// when the abbreviation is shorter. The status printed on the PEP's own
/// page must agree with what the code implies, otherwise the PEP is warned
/// about and left out of the tally. Rows come out in first-seen order with a
/// `Total` row last.
pub fn pep(fetcher: &impl Fetch) -> Result<Vec<Row>> {
    let index_url = Url::parse(PEP_LIST_URL)?;
    let page = fetcher.fetch_text(&index_url)?;
    let doc = Html::parse_document(&page.html);

    let index_section = find_tag(
        doc.root_element(),
        "section",
        &[AttrFilter::Exact("id", "index-by-category")],
    )?;

    let tr_sel = Selector::parse("tr").unwrap();
    let td_sel = Selector::parse("td").unwrap();
    let a_sel = Selector::parse("a").unwrap();
    let dt_sel = Selector::parse("dt").unwrap();

    let table_rows: Vec<_> = index_section.select(&tr_sel).collect();
    let mut tally: Vec<(String, usize)> = Vec::new();

    let pb = ProgressBar::new(table_rows.len() as u64);
    for tr in table_rows {
        pb.inc(1);

        // Header rows carry <th> only.
        let Some(first_td) = tr.select(&td_sel).next() else {
            continue;
        };
        let abbreviation = text_of(first_td);
        let code = abbreviation
            .chars()
            .nth(1)
            .map(String::from)
            .unwrap_or_default();
        let expected = expected_statuses(&code);

        let Some(href) = tr.select(&a_sel).next().and_then(|a| a.value().attr("href")) else {
            continue;
        };
        let pep_url = index_url.join(href)?;

        let pep_page = match fetcher.fetch_text(&pep_url) {
            Ok(page) => page,
            Err(e) => {
                warn!("Skipping {}: {}", pep_url, e);
                continue;
            }
        };
        let pep_doc = Html::parse_document(&pep_page.html);

        let status_dt = pep_doc
            .root_element()
            .select(&dt_sel)
            .find(|dt| text_of(*dt).eq_ignore_ascii_case("Status:"));
        let Some(status_dt) = status_dt else {
            warn!("No Status term on {}", pep_url);
            continue;
        };
        let Some(status_dd) = status_dt.next_siblings().filter_map(ElementRef::wrap).next()
        else {
            warn!("No value after the Status term on {}", pep_url);
            continue;
        };
        let observed = text_of(status_dd);

        if let Some(status) = reconcile(&observed, expected, pep_url.as_str()) {
            match tally.iter_mut().find(|(name, _)| name == status) {
                Some((_, count)) => *count += 1,
                None => tally.push((status.to_string(), 1)),
            }
        }
    }
    pb.finish_and_clear();

    let total: usize = tally.iter().map(|(_, count)| count).sum();
    let mut results = vec![vec!["Status".to_string(), "Count".to_string()]];
    results.extend(
        tally
            .into_iter()
            .map(|(name, count)| vec![name, count.to_string()]),
    );
    results.push(vec!["Total".to_string(), total.to_string()]);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::testutil::{fixture, StubFetch};

    const INDEX_URL: &str = "https://peps.python.org/";

    fn pep_page(status: &str) -> String {
        format!(
            "<html><body><dl class=\"rfc2822\">\n\
             <dt>Author:</dt><dd>Someone</dd>\n\
             <dt>Status:</dt><dd>{status}</dd>\n\
             </dl></body></html>"
        )
    }

    #[test]
    fn tallies_in_first_seen_order_with_total_last() {
        let stub = StubFetch::new()
            .page(INDEX_URL, fixture("pep_index.html"))
            .page("https://peps.python.org/pep-0001/", pep_page("Active"))
            .page("https://peps.python.org/pep-0008/", pep_page("Active"))
            .page("https://peps.python.org/pep-0020/", pep_page("Draft"));

        let rows = pep(&stub).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Status".to_string(), "Count".to_string()],
                vec!["Active".to_string(), "2".to_string()],
                vec!["Draft".to_string(), "1".to_string()],
                vec!["Total".to_string(), "3".to_string()],
            ]
        );
    }

    #[test]
    fn mismatched_status_is_excluded_from_tally() {
        // Index says "PA" (Active/Accepted) but the page reports Final.
        let stub = StubFetch::new()
            .page(INDEX_URL, fixture("pep_index.html"))
            .page("https://peps.python.org/pep-0001/", pep_page("Final"))
            .page("https://peps.python.org/pep-0008/", pep_page("Active"))
            .page("https://peps.python.org/pep-0020/", pep_page("Draft"));

        let rows = pep(&stub).unwrap();
        assert_eq!(rows.last().unwrap(), &vec!["Total".to_string(), "2".to_string()]);
        assert!(!rows.iter().any(|r| r[0] == "Final"));
    }

    #[test]
    fn failed_pep_fetch_is_skipped_not_fatal() {
        let stub = StubFetch::new()
            .page(INDEX_URL, fixture("pep_index.html"))
            .failing("https://peps.python.org/pep-0001/")
            .page("https://peps.python.org/pep-0008/", pep_page("Active"))
            .page("https://peps.python.org/pep-0020/", pep_page("Draft"));

        let rows = pep(&stub).unwrap();
        assert_eq!(rows.last().unwrap(), &vec!["Total".to_string(), "2".to_string()]);
    }

    #[test]
    fn missing_index_section_aborts() {
        let stub = StubFetch::new().page(INDEX_URL, "<html><body></body></html>");
        let err = pep(&stub).unwrap_err();
        assert!(matches!(err, crate::error::ScrapeError::TagNotFound { .. }));
    }
}
