//! Small vocabulary corpora and universe builders.

use wut_core::{IngestPlan, Triple, Universe};

/// The three-triple universe used by the end-to-end scenarios.
pub const SCENARIO: &[(&str, &str, &str)] = &[
    ("CESM2", "source_id", "CMIP6"),
    ("tas", "variable", "CMIP5"),
    ("MIROC6", "source_id", "CMIP6"),
];

/// A wider corpus spanning several projects and facets.
pub const CORPUS: &[(&str, &str, &str)] = &[
    ("CESM2", "source_id", "CMIP6"),
    ("CESM2-WACCM", "source_id", "CMIP6"),
    ("MIROC6", "source_id", "CMIP6"),
    ("tas", "variable_id", "CMIP6"),
    ("pr", "variable_id", "CMIP6"),
    ("historical", "experiment_id", "CMIP6"),
    ("ssp585", "experiment_id", "CMIP6"),
    ("CCSM4", "model", "CMIP5"),
    ("MIROC5", "model", "CMIP5"),
    ("tas", "variable", "CMIP5"),
    ("historical", "experiment", "CMIP5"),
    ("tas", "variable", "CORDEX"),
    ("EUR-11", "domain", "CORDEX"),
];

pub fn triples(rows: &[(&str, &str, &str)]) -> Vec<Triple> {
    rows.iter().copied().map(Triple::from).collect()
}

/// An in-memory universe holding `rows`.
pub fn universe_with(rows: &[(&str, &str, &str)]) -> Universe {
    let mut universe = Universe::open_in_memory().expect("in-memory universe");
    universe.ingest(triples(rows)).expect("ingest fixture triples");
    universe
}

/// Plan asking for the facets present in [`fake_facet_fields`](crate::common::fake_facet_fields).
pub fn small_plan() -> IngestPlan {
    [
        ("CMIP5", vec!["model", "variable"]),
        ("CMIP6", vec!["source_id", "variable_id"]),
    ]
    .into_iter()
    .collect()
}
