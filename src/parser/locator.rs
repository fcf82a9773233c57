//! Roster table location
//!
//! The roster page holds many tables. Detection is an ordered chain of
//! [`TableStrategy`] implementations; the first strategy that returns a table
//! wins, and when none does the document is declared structurally unusable.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::parser::selectors::{
    FULL_TEXT_TOKENS, HEADER_CELL, NAME_HEADERS, ROW, STATE_HEADERS, TABLE, TENURE_HEADERS,
};
use crate::parser::sanitize::sanitize_cell;
use crate::utils::error::ParseError;

/// Which strategy located the roster table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocateStrategy {
    HeaderMatch,
    FullText,
}

/// A table found by the locator
#[derive(Debug, Clone, Copy)]
pub struct LocatedTable<'a> {
    pub table: ElementRef<'a>,
    pub strategy: LocateStrategy,
}

/// One way of picking the roster table out of a document
pub trait TableStrategy: Send + Sync {
    /// Strategy identifier, used in reports
    fn kind(&self) -> LocateStrategy;

    /// Return the first qualifying table in document order
    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>>;
}

/// Marked tables whose header row names a legislator, a state and a tenure column
pub struct HeaderMatchStrategy {
    marker: Selector,
}

impl HeaderMatchStrategy {
    pub fn new(marker: Selector) -> Self {
        Self { marker }
    }

    fn qualifies(table: ElementRef<'_>) -> bool {
        let headers = header_texts(table);
        let any_header = |keywords: &[&str]| {
            headers
                .iter()
                .any(|header| keywords.iter().any(|k| header.contains(k)))
        };

        any_header(NAME_HEADERS) && any_header(STATE_HEADERS) && any_header(TENURE_HEADERS)
    }
}

impl TableStrategy for HeaderMatchStrategy {
    fn kind(&self) -> LocateStrategy {
        LocateStrategy::HeaderMatch
    }

    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .select(&self.marker)
            .find(|table| Self::qualifies(*table))
    }
}

/// Any table whose text mentions all of the roster's key tokens
pub struct FullTextStrategy;

impl TableStrategy for FullTextStrategy {
    fn kind(&self) -> LocateStrategy {
        LocateStrategy::FullText
    }

    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&TABLE).find(|table| {
            let text = table.text().collect::<String>();
            FULL_TEXT_TOKENS.iter().all(|token| text.contains(token))
        })
    }
}

/// Ordered strategy chain
pub struct TableLocator {
    strategies: Vec<Box<dyn TableStrategy>>,
}

impl TableLocator {
    /// Header matching over marked tables, then the full-text scan
    pub fn new(marker: Selector) -> Self {
        Self::with_strategies(vec![
            Box::new(HeaderMatchStrategy::new(marker)),
            Box::new(FullTextStrategy),
        ])
    }

    /// Build a locator from an explicit chain
    pub fn with_strategies(strategies: Vec<Box<dyn TableStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run the chain
    ///
    /// # Errors
    ///
    /// Returns `ParseError::TableNotFound` when every strategy comes up empty.
    pub fn locate<'a>(&self, document: &'a Html) -> Result<LocatedTable<'a>, ParseError> {
        for strategy in &self.strategies {
            if let Some(table) = strategy.locate(document) {
                tracing::debug!(strategy = ?strategy.kind(), "Roster table located");
                return Ok(LocatedTable {
                    table,
                    strategy: strategy.kind(),
                });
            }
        }

        Err(ParseError::TableNotFound)
    }
}

/// The first row of a table that carries `<th>` cells
pub fn header_row(table: ElementRef<'_>) -> Option<ElementRef<'_>> {
    table
        .select(&ROW)
        .find(|row| row.select(&HEADER_CELL).next().is_some())
}

/// Lower-cased, trimmed texts of the header row's cells
pub fn header_texts(table: ElementRef<'_>) -> Vec<String> {
    header_row(table)
        .map(|row| {
            row_cells(row)
                .into_iter()
                .map(|cell| sanitize_cell(&cell_text(cell)).to_lowercase())
                .collect()
        })
        .unwrap_or_default()
}

/// Direct `<th>`/`<td>` children of a row, in order
///
/// Cells of tables nested inside a cell are not included.
pub fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .collect()
}

/// Concatenated text of an element
pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}
