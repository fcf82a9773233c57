//! Document retrieval
//!
//! The roster service depends on the [`DocumentSource`] trait rather than on
//! HTTP directly, so tests and alternative transports can stand in for
//! [`RosterFetcher`].

pub mod fetcher;

pub use fetcher::{decode_bytes, DocumentSource, RosterFetcher};
