#![allow(unused)]
//! Bootstrap integration harness.
//!
//! # What this covers
//!
//! - **First use**: a missing universe file is built from the plan and the
//!   path is returned ready to query.
//! - **Existing file**: returned unchanged; the remote source is not touched.
//! - **Regenerate**: the only deletion path; the file is removed and rebuilt.
//! - **Failed build**: a harvest failure leaves no universe file behind, so
//!   the next run starts over instead of accepting a partial index.
//!
//! # Running
//!
//! ```sh
//! cargo test --test bootstrap_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use std::time::Duration;
use wut::{ensure_universe, regenerate_universe};
use wut_core::Universe;
use wut_harvest::FacetSearch;

fn search(api: &FakeFacetApi) -> FacetSearch {
    FacetSearch::new(api.base_url(), Duration::from_secs(5)).unwrap()
}

fn seeded_api() -> FakeFacetApi {
    let api = FakeFacetApi::start().unwrap();
    api.serve_project("CMIP5", fake_facet_fields("CMIP5"));
    api.serve_project("CMIP6", fake_facet_fields("CMIP6"));
    api
}

#[test]
fn missing_universe_is_built_from_the_plan() {
    let api = seeded_api();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("esgf_cv_universe.db");

    let ready = ensure_universe(&path, &small_plan(), &search(&api)).unwrap();
    assert_eq!(ready, path);
    assert!(path.is_file());
    assert_eq!(api.requests().len(), 2);

    let universe = Universe::open(&ready).unwrap();
    let view = universe.query(&["CESM*"], Some("CMIP6")).unwrap();
    assert_eq!(
        view.terms("CMIP6", "source_id"),
        Some(&["CESM2".to_string(), "CESM2-WACCM".to_string()][..])
    );
}

#[test]
fn existing_universe_is_not_reingested() {
    let api = seeded_api();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("esgf_cv_universe.db");
    {
        let mut universe = Universe::open(&path).unwrap();
        universe.ingest(triples(SCENARIO)).unwrap();
    }

    ensure_universe(&path, &small_plan(), &search(&api)).unwrap();
    assert!(api.requests().is_empty());

    let universe = Universe::open(&path).unwrap();
    assert_eq!(universe.stats().unwrap().terms, 3);
}

#[test]
fn regenerate_rebuilds_from_scratch() {
    let api = seeded_api();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("esgf_cv_universe.db");
    {
        let mut universe = Universe::open(&path).unwrap();
        universe.ingest([("stale", "source_id", "CMIP3")]).unwrap();
    }

    regenerate_universe(&path, &small_plan(), &search(&api)).unwrap();
    assert_eq!(api.requests().len(), 2);

    let universe = Universe::open(&path).unwrap();
    assert!(universe.query(&["stale"], None).unwrap().is_empty());
    assert_eq!(universe.stats().unwrap().terms, 8);
}

#[test]
fn regenerate_without_existing_file_just_builds() {
    let api = seeded_api();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("esgf_cv_universe.db");

    regenerate_universe(&path, &small_plan(), &search(&api)).unwrap();
    assert!(path.is_file());
}

#[test]
fn failed_build_leaves_no_universe_behind() {
    let api = seeded_api();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("esgf_cv_universe.db");

    api.fail_next(500, 1);
    assert!(ensure_universe(&path, &small_plan(), &search(&api)).is_err());
    assert!(!path.exists());

    // The next run starts over and succeeds.
    ensure_universe(&path, &small_plan(), &search(&api)).unwrap();
    let universe = Universe::open(&path).unwrap();
    assert_eq!(universe.stats().unwrap().terms, 8);
}
