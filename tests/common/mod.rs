//! Shared test utilities for the wut integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod fake_facet_api;
pub mod fixtures;

pub use fake_facet_api::*;
pub use fixtures::*;
