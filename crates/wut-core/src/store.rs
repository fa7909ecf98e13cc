//! Universe: the SQLite-backed handle over the Collections/Terms schema.
//!
//! The store is the single source of truth; ingestion writes through it and
//! queries read from it. Opening a handle always runs
//! [`ensure_schema`](crate::schema::ensure_schema).

use crate::error::{Error, Result};
use crate::ingest::{self, IngestReport};
use crate::query;
use crate::schema::ensure_schema;
use crate::types::{Triple, UniverseStats, UniverseView};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub struct Universe {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Universe {
    /// Create or load the universe file at `path`. The parent directory must
    /// exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(Error::io(
                    parent,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "directory does not exist"),
                ));
            }
        }
        let conn = Connection::open(path)?;
        ensure_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened universe");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Backing file, `None` for an in-memory universe.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn ingest<I>(&mut self, triples: I) -> Result<IngestReport>
    where
        I: IntoIterator,
        I::Item: Into<Triple>,
    {
        ingest::ingest_triples(&mut self.conn, triples)
    }

    pub fn query<S: AsRef<str>>(&self, terms: &[S], project: Option<&str>) -> Result<UniverseView> {
        query::query_universe(&self.conn, terms, project)
    }

    pub fn stats(&self) -> Result<UniverseStats> {
        let collections: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM Collections", [], |row| row.get(0))?;
        let terms: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Terms", [], |row| row.get(0))?;
        Ok(UniverseStats {
            collections: collections as u64,
            terms: terms as u64,
        })
    }
}

impl std::fmt::Debug for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Universe").field("path", &self.path).finish()
    }
}
