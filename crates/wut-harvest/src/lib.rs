//! wut-harvest: vocabulary source adapters for wut.
//!
//! Each source turns a project and its facet names into [`Triple`]s, which
//! [`ingest_by_facet_query`] feeds straight into a [`Universe`].

pub mod facet;
pub mod registry;
pub mod retry;

pub use facet::{flatten_facet_fields, FacetSearch};
pub use registry::{ingest_by_registry, VocabularyRegistry};
pub use retry::RetryPolicy;

use wut_core::{IngestPlan, Triple, Universe};

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// The request could not be sent or its body could not be read.
    #[error("facet query for project {project:?} failed: {source}")]
    Transport {
        project: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("facet query for project {project:?} returned HTTP {status}")]
    Status {
        project: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed facet response for project {project:?}: {reason}")]
    Payload { project: String, reason: String },

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Store(#[from] wut_core::Error),
}

impl HarvestError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            HarvestError::Transport { .. } => true,
            HarvestError::Status { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

/// A source of vocabulary triples, queried one project at a time.
pub trait TermSource {
    fn harvest_project(
        &self,
        project: &str,
        facets: &[String],
    ) -> Result<Vec<Triple>, HarvestError>;
}

/// Harvest every project of `plan` from `source` and ingest each project's
/// triples as soon as they arrive.
///
/// Stops at the first failing project; projects ingested before it stay in
/// the universe.
pub fn ingest_by_facet_query<S: TermSource + ?Sized>(
    universe: &mut Universe,
    plan: &IngestPlan,
    source: &S,
) -> Result<usize, HarvestError> {
    let mut total = 0;
    for (project, facets) in plan.projects() {
        let triples = source.harvest_project(project, facets)?;
        let report = universe.ingest(triples)?;
        tracing::info!(
            project,
            facets = facets.len(),
            triples = report.triples,
            "harvested project"
        );
        total += report.triples;
    }
    Ok(total)
}
