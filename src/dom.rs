//! First-match tag lookup over a parsed document.
//!
//! `scraper`'s `select` walks descendants depth-first in document order; that
//! order is load-bearing (e.g. "the first <dl> on the page").

use std::fmt;

use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::error;

use crate::error::{Result, ScrapeError};

/// Attribute constraint for [`find_tag`].
#[derive(Debug)]
pub enum AttrFilter<'a> {
    /// Attribute present with exactly this value.
    Exact(&'a str, &'a str),
    /// Class-list membership (a class attribute is a whitespace-separated
    /// token list, so exact match would miss `class="toctree-wrapper compound"`).
    Class(&'a str),
    /// Attribute present and matching the pattern.
    Matches(&'a str, &'a Regex),
}

impl AttrFilter<'_> {
    fn accepts(&self, el: &ElementRef) -> bool {
        match self {
            AttrFilter::Exact(name, value) => el.value().attr(name) == Some(*value),
            AttrFilter::Class(token) => el
                .value()
                .attr("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == *token)),
            AttrFilter::Matches(name, re) => {
                el.value().attr(name).is_some_and(|v| re.is_match(v))
            }
        }
    }
}

impl fmt::Display for AttrFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrFilter::Exact(name, value) => write!(f, "{}=\"{}\"", name, value),
            AttrFilter::Class(token) => write!(f, "class~=\"{}\"", token),
            AttrFilter::Matches(name, re) => write!(f, "{}~/{}/", name, re.as_str()),
        }
    }
}

/// Find the first descendant of `scope` with the given tag name satisfying
/// every filter. Absence is always the typed `TagNotFound` error, never a
/// silent null; every call site relies on this to fail fast.
pub fn find_tag<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    filters: &[AttrFilter],
) -> Result<ElementRef<'a>> {
    let selector = Selector::parse(tag).expect("tag name is a valid selector");
    let found = scope
        .select(&selector)
        .find(|el| filters.iter().all(|f| f.accepts(el)));

    found.ok_or_else(|| {
        let filter = filters
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        error!("Tag <{}> not found (filter: [{}])", tag, filter);
        ScrapeError::TagNotFound {
            tag: tag.to_string(),
            filter,
        }
    })
}

/// Concatenated text of an element's descendants, trimmed.
pub fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const DOC: &str = r#"
        <html><body>
          <section id="one"><p class="lead note">first</p></section>
          <section id="two"><p class="lead">second</p></section>
          <a href="/archive/doc-pdf-a4.zip">archive</a>
          <a href="/other/page.html">other</a>
        </body></html>
    "#;

    #[test]
    fn first_document_order_match() {
        let doc = Html::parse_document(DOC);
        let p = find_tag(doc.root_element(), "p", &[]).unwrap();
        assert_eq!(text_of(p), "first");
    }

    #[test]
    fn exact_attribute_filter() {
        let doc = Html::parse_document(DOC);
        let section = find_tag(doc.root_element(), "section", &[AttrFilter::Exact("id", "two")])
            .unwrap();
        assert_eq!(text_of(section), "second");
    }

    #[test]
    fn class_filter_matches_token_in_list() {
        let doc = Html::parse_document(DOC);
        let p = find_tag(doc.root_element(), "p", &[AttrFilter::Class("note")]).unwrap();
        assert_eq!(text_of(p), "first");
    }

    #[test]
    fn regex_filter_on_href() {
        let doc = Html::parse_document(DOC);
        let re = Regex::new(r".+pdf-a4\.zip$").unwrap();
        let a = find_tag(doc.root_element(), "a", &[AttrFilter::Matches("href", &re)]).unwrap();
        assert_eq!(a.value().attr("href"), Some("/archive/doc-pdf-a4.zip"));
    }

    #[test]
    fn missing_tag_is_typed_error() {
        let doc = Html::parse_document(DOC);
        let err = find_tag(doc.root_element(), "table", &[]).unwrap_err();
        match err {
            crate::error::ScrapeError::TagNotFound { tag, .. } => assert_eq!(tag, "table"),
            other => panic!("expected TagNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_attribute_carries_filter() {
        let doc = Html::parse_document(DOC);
        let err = find_tag(
            doc.root_element(),
            "section",
            &[AttrFilter::Exact("id", "three")],
        )
        .unwrap_err();
        match err {
            crate::error::ScrapeError::TagNotFound { tag, filter } => {
                assert_eq!(tag, "section");
                assert!(filter.contains("id=\"three\""));
            }
            other => panic!("expected TagNotFound, got {other:?}"),
        }
    }
}
