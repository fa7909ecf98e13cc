//! Ingestion plan: which facets to harvest for which project.
//!
//! The default plan is embedded in the binary via [`include_str!`] so a fresh
//! universe can be built without any files on disk. A user plan with the same
//! shape can be loaded with [`IngestPlan::from_path`]:
//!
//! ```yaml
//! CMIP6:
//!   - source_id
//!   - variable_id
//! CMIP5:
//!   - model
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const BUNDLED_PLAN_SRC: &str = include_str!("../data/database_facets.yaml");

/// Mapping from project name to the facet names harvested as collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct IngestPlan(BTreeMap<String, Vec<String>>);

impl IngestPlan {
    /// The plan shipped with wut.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(BUNDLED_PLAN_SRC)
    }

    pub fn from_yaml(src: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(src)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&src)
    }

    /// Iterate `(project, facets)` in project-name order.
    pub fn projects(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(p, f)| (p.as_str(), f.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P, F> FromIterator<(P, Vec<F>)> for IngestPlan
where
    P: Into<String>,
    F: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, Vec<F>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(p, facets)| (p.into(), facets.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}
