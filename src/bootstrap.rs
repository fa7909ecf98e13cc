//! Universe bootstrap: build the local index on first use.
//!
//! [`ensure_universe`] is an explicit, idempotent call: an existing file is
//! returned untouched, a missing one is harvested from scratch. A fresh build
//! is staged next to the target and renamed into place only once every
//! project has been ingested, so a failed bootstrap never leaves behind a
//! half-built universe that later runs would accept.

use std::path::{Path, PathBuf};
use wut_core::{IngestPlan, Universe};
use wut_harvest::{ingest_by_facet_query, HarvestError, TermSource};

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Remove leftovers of an earlier failed build: the staging file and its
/// rollback journal. SQLite would otherwise replay a hot journal into the
/// fresh staging file.
fn clear_staging(staging: &Path) -> Result<(), HarvestError> {
    let mut journal = staging.as_os_str().to_os_string();
    journal.push("-journal");
    for stale in [staging.to_path_buf(), PathBuf::from(journal)] {
        if stale.exists() {
            tracing::debug!(path = %stale.display(), "removing stale staging file");
            std::fs::remove_file(&stale).map_err(|e| io_error(&stale, e))?;
        }
    }
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> HarvestError {
    HarvestError::Store(wut_core::Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Return `path` once it holds a queryable universe, harvesting `plan` from
/// `source` if the file does not exist yet.
pub fn ensure_universe<S: TermSource + ?Sized>(
    path: &Path,
    plan: &IngestPlan,
    source: &S,
) -> Result<PathBuf, HarvestError> {
    if path.is_file() {
        tracing::debug!(path = %path.display(), "universe already present");
        return Ok(path.to_path_buf());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let staging = staging_path(path);
    clear_staging(&staging)?;

    tracing::info!(path = %path.display(), projects = plan.len(), "building universe");
    let stats = {
        let mut universe = Universe::open(&staging)?;
        ingest_by_facet_query(&mut universe, plan, source)?;
        universe.stats()?
    };
    std::fs::rename(&staging, path).map_err(|e| io_error(path, e))?;
    tracing::info!(path = %path.display(), %stats, "universe ready");
    Ok(path.to_path_buf())
}

/// Discard the universe at `path`, if any, and build it again.
pub fn regenerate_universe<S: TermSource + ?Sized>(
    path: &Path,
    plan: &IngestPlan,
    source: &S,
) -> Result<PathBuf, HarvestError> {
    if path.is_file() {
        tracing::info!(path = %path.display(), "removing universe");
        std::fs::remove_file(path).map_err(|e| io_error(path, e))?;
    }
    ensure_universe(path, plan, source)
}
