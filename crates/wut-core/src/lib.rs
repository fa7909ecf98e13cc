//! wut-core: the controlled-vocabulary universe.
//!
//! This crate owns the local index of ESGF vocabulary: which terms exist, in
//! which collection (facet), under which project.
//!
//! # Architecture
//!
//! ```text
//! triples ──► Ingest ──► Schema (SQLite) ◄── Query ◄── glob patterns
//!                                              │
//!                                              └──► UniverseView
//! ```
//!
//! Sources that produce triples live in `wut-harvest`; the bootstrap and the
//! CLI live in the `wut` binary crate.

pub mod config;
pub mod error;
pub mod ingest;
pub mod plan;
pub mod query;
pub mod schema;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use ingest::IngestReport;
pub use plan::IngestPlan;
pub use store::Universe;
pub use types::{TermRow, Triple, UniverseStats, UniverseView};
