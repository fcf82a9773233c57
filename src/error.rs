//! Unified error handling for the rollcall crate
//!
//! Extraction can fail while fetching or while parsing; [`Error`] carries
//! either one up to the roster service. Caller input errors stay as
//! [`RosterError`] and share the same [`RollcallErrorTrait`] interface.
//!
//! # Architecture
//!
//! - [`RollcallErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Extraction failure, fetch or parse
//!
//! # Usage
//!
//! ```rust,ignore
//! use rollcall::error::{Error, ErrorCategory, RollcallErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         println!("Retrying later: {}", err.describe());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::{FetchError, ParseError, RosterError};

/// Common trait for all rollcall error types
pub trait RollcallErrorTrait: std::error::Error {
    /// Check if this error is recoverable (a later attempt may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get a user-facing description
    fn describe(&self) -> String {
        format!("{}: {self}", self.category().label())
    }

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Source unreachable, timeouts, bad status codes
    Network,
    /// Document structure did not match any extraction strategy
    Structure,
    /// Caller supplied malformed input
    Input,
}

impl ErrorCategory {
    /// Short human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Structure => "structure error",
            Self::Input => "invalid input",
        }
    }
}

impl RollcallErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::ServerError(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

impl RollcallErrorTrait for ParseError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Structure
    }
}

impl RollcallErrorTrait for RosterError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}

/// Unified error type for the rollcall crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Parse-specific errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl RollcallErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Parse(e) => e.is_recoverable(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Fetch(e) => e.describe(),
            Self::Parse(e) => e.describe(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Parse(e) => e.category(),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
