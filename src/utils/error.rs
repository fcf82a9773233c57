//! Error types for the rollcall extraction engine
//!
//! This module defines the domain error types used throughout the application.

use thiserror::Error;

/// Errors that can occur while fetching the source document
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code from the source
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while extracting the roster from a parsed document
#[derive(Error, Debug)]
pub enum ParseError {
    /// No table in the document qualified as the roster table
    #[error("Roster table not found")]
    TableNotFound,

    /// The document had no markup to work with
    #[error("Empty document")]
    EmptyDocument,

    /// A configured selector could not be parsed
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Errors surfaced to callers of the roster operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Caller supplied a date that is not a well-formed calendar date
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
