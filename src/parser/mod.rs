//! Roster extraction from loosely-structured HTML
//!
//! The pipeline runs in stages:
//!
//! - [`locator`] picks the roster table out of the page
//! - [`columns`] maps header text to field positions
//! - [`rows`] turns each data row into a record, or a skip reason
//! - [`normalize`] and [`sanitize`] clean individual cell values
//! - [`report`] collects diagnostics for the whole run
//!
//! [`RosterParser`] drives the stages end to end.

pub mod columns;
pub mod html;
pub mod locator;
pub mod normalize;
pub mod report;
pub mod rows;
pub mod sanitize;
pub mod selectors;

pub use columns::{ColumnMap, Field};
pub use html::{Extraction, RosterParser};
pub use locator::{LocateStrategy, TableLocator, TableStrategy};
pub use report::ExtractionReport;
pub use rows::{RowOutcome, SkipReason};
