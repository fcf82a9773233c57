//! Row extraction
//!
//! Turns the data rows of a located roster table into [`LegislatorRecord`]s,
//! and recovers bare names from legislator links when the table pass comes up
//! short.

use std::collections::HashSet;

use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use serde::Serialize;

use crate::models::{LegislatorRecord, Party};
use crate::parser::columns::{ColumnMap, Field};
use crate::parser::locator::{cell_text, header_row, row_cells};
use crate::parser::normalize::{classify_party, clean_name, normalize_date, normalize_state};
use crate::parser::sanitize::sanitize_cell;
use crate::parser::selectors::{ROW, TITLED_LINK};

/// Minimum cells a data row must carry
pub const MIN_ROW_CELLS: usize = 3;

/// Minimum characters in a cleaned name
pub const MIN_NAME_CHARS: usize = 3;

/// State placeholder for link-recovered records
pub const UNKNOWN_STATE: &str = "Unknown";

/// Why a row produced no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    TooFewCells { found: usize },
    NameTooShort { name: String },
    MissingState,
}

impl SkipReason {
    /// Stable key for aggregation
    pub fn key(&self) -> &'static str {
        match self {
            Self::TooFewCells { .. } => "too_few_cells",
            Self::NameTooShort { .. } => "name_too_short",
            Self::MissingState => "missing_state",
        }
    }
}

/// Result of extracting a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted {
        record: LegislatorRecord,
        /// Fields filled in with a placeholder value
        defaulted: Vec<Field>,
    },
    Skipped(SkipReason),
}

/// Applies a resolved column map to table rows
pub struct RowExtractor<'c> {
    columns: &'c ColumnMap,
    default_date: NaiveDate,
}

impl<'c> RowExtractor<'c> {
    pub fn new(columns: &'c ColumnMap, default_date: NaiveDate) -> Self {
        Self {
            columns,
            default_date,
        }
    }

    /// Extract every data row of `table`, in document order
    pub fn extract_table(&self, table: ElementRef<'_>) -> Vec<RowOutcome> {
        data_rows(table)
            .into_iter()
            .map(|row| self.extract_row(row))
            .collect()
    }

    /// Extract one row
    pub fn extract_row(&self, row: ElementRef<'_>) -> RowOutcome {
        let cells = row_cells(row);
        if cells.len() < MIN_ROW_CELLS {
            return RowOutcome::Skipped(SkipReason::TooFewCells { found: cells.len() });
        }

        let text_at = |index: usize| cells.get(index).map(|cell| cell_text(*cell));

        let name = text_at(self.columns.name)
            .map(|raw| clean_name(&raw))
            .unwrap_or_default();
        if name.chars().count() < MIN_NAME_CHARS {
            return RowOutcome::Skipped(SkipReason::NameTooShort { name });
        }

        let state = text_at(self.columns.state)
            .map(|raw| normalize_state(&raw).to_uppercase())
            .unwrap_or_default();
        if state.is_empty() {
            return RowOutcome::Skipped(SkipReason::MissingState);
        }

        let mut defaulted = Vec::new();

        let party = match text_at(self.columns.party) {
            Some(text) => classify_party(&text, &row_hint(row)),
            None => Party::Unknown,
        };
        if party == Party::Unknown {
            defaulted.push(Field::Party);
        }

        let office_start_date = self
            .columns
            .office_start
            .and_then(text_at)
            .and_then(|raw| normalize_date(&raw))
            .unwrap_or_else(|| {
                defaulted.push(Field::OfficeStart);
                self.default_date
            });

        RowOutcome::Accepted {
            record: LegislatorRecord::new(name, state, party, office_start_date),
            defaulted,
        }
    }
}

/// Rows carrying at least one `<td>`, excluding the header row
pub fn data_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let header_id = header_row(table).map(|row| row.id());

    table
        .select(&ROW)
        .filter(|row| Some(row.id()) != header_id)
        .filter(|row| row_cells(*row).iter().any(|cell| cell.value().name() == "td"))
        .collect()
}

/// Row-level classification hint: the row's class plus any `data-party`
fn row_hint(row: ElementRef<'_>) -> String {
    let element = row.value();
    [element.attr("class"), element.attr("data-party")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Recover names from links whose title mentions `keyword`
///
/// Each unique link text not already present in `known_names` becomes a
/// record with an unknown state and party and the default date. Matching
/// against known names is by exact text only.
pub fn recover_from_links(
    document: &Html,
    keyword: &str,
    known_names: &HashSet<String>,
    default_date: NaiveDate,
) -> Vec<LegislatorRecord> {
    let keyword = keyword.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut recovered = Vec::new();

    for link in document.select(&TITLED_LINK) {
        let titled = link
            .value()
            .attr("title")
            .is_some_and(|title| title.to_lowercase().contains(&keyword));
        if !titled {
            continue;
        }

        let name = sanitize_cell(&cell_text(link));
        if name.chars().count() < MIN_NAME_CHARS || known_names.contains(&name) {
            continue;
        }

        if seen.insert(name.clone()) {
            recovered.push(LegislatorRecord::new(
                name,
                UNKNOWN_STATE,
                Party::Unknown,
                default_date,
            ));
        }
    }

    recovered
}
