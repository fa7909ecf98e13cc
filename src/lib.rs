//! wut: what's in the ESGF controlled vocabulary universe?
//!
//! Keeps a local SQLite index of the terms ESGF publishes per project and
//! facet, and answers glob queries against it. This crate exposes the layers
//! as public modules so that integration tests can import them directly.
//!
//! # Architecture
//!
//! ```text
//! IngestPlan ──► Harvest (wut-harvest) ──► Universe (wut-core) ◄── Query
//!      │                                        ▲                   │
//!      └──────────── Bootstrap ─────────────────┘                   ▼
//!                                                                 Output
//! ```
//!
//! Everything is synchronous; remote calls block one project at a time.

pub mod bootstrap;
pub mod output;

pub use bootstrap::{ensure_universe, regenerate_universe};
pub use output::{render, FormatError, OutputFormat};
pub use wut_core::{IngestPlan, Triple, Universe, UniverseView};
