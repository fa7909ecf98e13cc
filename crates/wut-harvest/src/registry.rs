//! Structured vocabulary registry source.
//!
//! Reading the published CV registry directly (instead of inferring terms from
//! facet counts) is not built yet. The source keeps the [`TermSource`] shape
//! so callers can be wired up against it, but every call fails immediately.

use crate::{HarvestError, TermSource};
use wut_core::{Triple, Universe};

#[derive(Debug, Clone, Copy, Default)]
pub struct VocabularyRegistry;

impl TermSource for VocabularyRegistry {
    fn harvest_project(
        &self,
        _project: &str,
        _facets: &[String],
    ) -> Result<Vec<Triple>, HarvestError> {
        Err(HarvestError::NotImplemented("vocabulary registry harvesting"))
    }
}

/// Build the universe from the vocabulary registry. Always fails with
/// [`HarvestError::NotImplemented`] and leaves the universe untouched.
pub fn ingest_by_registry(_universe: &mut Universe) -> Result<usize, HarvestError> {
    Err(HarvestError::NotImplemented("vocabulary registry ingestion"))
}
