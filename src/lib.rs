//! rollcall - Resilient legislator roster extraction
//!
//! Extracts a roster of legislators (name, state, party, date assumed office)
//! from a loosely-structured HTML table and serves it, with tenure filtering
//! and a party breakdown, through a small cached read API.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Document retrieval over HTTP
//! - [`parser`] - Table location, column resolution and row extraction
//! - [`cache`] - Time-bounded snapshot cache
//! - [`roster`] - Roster operations with fallback on failure
//! - [`api`] - REST API server
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use rollcall::config::Config;
//! use rollcall::roster::RosterService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let service = RosterService::with_http(&config)?;
//!     let roster = service.get_roster().await;
//!     println!("{} senators", roster.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod roster;
pub mod utils;

// Direct re-exports for convenience
pub use models::{LegislatorRecord, Party, PartyBreakdown};
