//! Core types for wut-core.
//!
//! This module defines the data shared across the ingestion and query layers:
//! the [`Triple`] that every source produces, the [`UniverseView`] returned by
//! a query, and the [`UniverseStats`] row counts.

use serde::Serialize;
use std::collections::BTreeMap;

/// One ingestion unit: a term, the collection (facet) it belongs to, and the
/// project that owns the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub term: String,
    pub collection: String,
    pub project: String,
}

impl Triple {
    pub fn new(
        term: impl Into<String>,
        collection: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            collection: collection.into(),
            project: project.into(),
        }
    }
}

impl<T, C, P> From<(T, C, P)> for Triple
where
    T: Into<String>,
    C: Into<String>,
    P: Into<String>,
{
    fn from((term, collection, project): (T, C, P)) -> Self {
        Triple::new(term, collection, project)
    }
}

/// A single joined row of the query: `(TermName, CollectionName, ProjectName)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRow {
    pub term: String,
    pub collection: String,
    pub project: String,
}

/// Terms grouped by project, then by collection.
///
/// This is a derived view recomputed on every query. Every group is a list,
/// even when it holds a single term. Serialises as a plain nested mapping:
///
/// ```json
/// {"CMIP6": {"source_id": ["CESM2"]}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UniverseView(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl UniverseView {
    /// Group joined rows by project and collection, keeping row order inside
    /// each group.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = TermRow>,
    {
        let mut view = BTreeMap::<String, BTreeMap<String, Vec<String>>>::new();
        for row in rows {
            view.entry(row.project)
                .or_default()
                .entry(row.collection)
                .or_default()
                .push(row.term);
        }
        Self(view)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Collections (with their matching terms) of one project.
    pub fn project(&self, project: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.0.get(project)
    }

    /// Matching terms of one `(project, collection)` group.
    pub fn terms(&self, project: &str, collection: &str) -> Option<&[String]> {
        self.0
            .get(project)
            .and_then(|collections| collections.get(collection))
            .map(Vec::as_slice)
    }

    /// Iterate `(project, collection, terms)` groups in key order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &str, &[String])> {
        self.0.iter().flat_map(|(project, collections)| {
            collections.iter().map(move |(collection, terms)| {
                (project.as_str(), collection.as_str(), terms.as_slice())
            })
        })
    }

    pub fn into_inner(self) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
        self.0
    }
}

/// Row counts of the two universe tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniverseStats {
    pub collections: u64,
    pub terms: u64,
}

impl std::fmt::Display for UniverseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} collections, {} terms", self.collections, self.terms)
    }
}
