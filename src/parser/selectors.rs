//! CSS selectors and header keyword sets for roster tables
//!
//! Selectors that do not depend on configuration are parsed once; the
//! data-table marker is configurable and is parsed by [`marker_selector`].

use lazy_static::lazy_static;
use scraper::Selector;

use crate::utils::error::ParseError;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    pub static ref TABLE: Selector = parse_selector!("table");
    pub static ref ROW: Selector = parse_selector!("tr");
    pub static ref HEADER_CELL: Selector = parse_selector!("th");
    pub static ref TITLED_LINK: Selector = parse_selector!("a[title]");
}

/// Header keywords that identify the name column
pub const NAME_HEADERS: &[&str] = &["senator", "name"];

/// Header keywords that identify the state column
pub const STATE_HEADERS: &[&str] = &["state"];

/// Header keywords that identify the party column
pub const PARTY_HEADERS: &[&str] = &["party"];

/// Header keywords used to recognize the roster table by its tenure column
pub const TENURE_HEADERS: &[&str] = &["assumed office", "since", "term"];

/// Header keywords that identify the office-start column
pub const OFFICE_START_HEADERS: &[&str] = &["assumed office", "since", "took office", "term began"];

/// Literal tokens the full-text fallback expects inside the roster table
pub const FULL_TEXT_TOKENS: &[&str] = &["Senator", "State", "Party"];

/// Build the selector for tables carrying the data-table marker class
///
/// # Errors
///
/// Returns `ParseError::InvalidSelector` if the marker does not form a valid
/// class selector.
pub fn marker_selector(marker: &str) -> Result<Selector, ParseError> {
    let css = format!("table.{}", marker.trim());
    let parsed = Selector::parse(&css).ok();
    parsed.ok_or(ParseError::InvalidSelector(css))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_static_selectors_parse() {
        let doc = Html::parse_document(
            r#"<table><tr><th>H</th><td>D</td></tr></table><a title="x">x</a>"#,
        );
        assert_eq!(doc.select(&TABLE).count(), 1);
        assert_eq!(doc.select(&ROW).count(), 1);
        assert_eq!(doc.select(&HEADER_CELL).count(), 1);
        assert_eq!(doc.select(&TITLED_LINK).count(), 1);
    }

    #[test]
    fn test_marker_selector() {
        let doc = Html::parse_document(
            r#"<table class="wikitable sortable"></table><table class="infobox"></table>"#,
        );
        let selector = marker_selector("wikitable").unwrap();
        assert_eq!(doc.select(&selector).count(), 1);
    }

    #[test]
    fn test_marker_selector_rejects_garbage() {
        match marker_selector("not a class!") {
            Err(ParseError::InvalidSelector(css)) => assert_eq!(css, "table.not a class!"),
            other => panic!("expected InvalidSelector, got {other:?}"),
        }
    }
}
