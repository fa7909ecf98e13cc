//! Ingestion engine: insert-if-absent upsert of [`Triple`]s.
//!
//! Each triple runs in its own transaction and is committed before the next
//! one starts, so an interrupted run leaves a valid (if incomplete) universe.
//! Re-ingesting a triple is a no-op.

use crate::error::{Error, Result};
use crate::types::Triple;
use rusqlite::{params, Connection, Transaction};

/// Summary of one [`ingest_triples`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Triples processed, whether or not they added rows.
    pub triples: usize,
}

/// Insert every triple that is not already present, in order.
///
/// Fails with [`Error::Consistency`] if the collection lookup after the
/// insert does not resolve to exactly one row.
pub fn ingest_triples<I>(conn: &mut Connection, triples: I) -> Result<IngestReport>
where
    I: IntoIterator,
    I::Item: Into<Triple>,
{
    let mut report = IngestReport::default();
    for triple in triples {
        let triple = triple.into();
        let tx = conn.transaction()?;
        ingest_one(&tx, &triple)?;
        tx.commit()?;
        report.triples += 1;
    }
    tracing::debug!(triples = report.triples, "ingested triples");
    Ok(report)
}

fn ingest_one(tx: &Transaction<'_>, triple: &Triple) -> Result<()> {
    tx.execute(
        "INSERT INTO Collections (CollectionName, ProjectName) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![triple.collection, triple.project],
    )?;

    let collection_id = resolve_collection(tx, &triple.collection, &triple.project)?;

    tx.execute(
        "INSERT INTO Terms (TermName, CollectionId) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![triple.term, collection_id],
    )?;
    Ok(())
}

fn resolve_collection(tx: &Transaction<'_>, collection: &str, project: &str) -> Result<i64> {
    let mut stmt = tx.prepare_cached(
        "SELECT CollectionId FROM Collections WHERE CollectionName = ?1 AND ProjectName = ?2",
    )?;
    let ids = stmt
        .query_map(params![collection, project], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    match ids.as_slice() {
        [id] => Ok(*id),
        _ => Err(Error::Consistency {
            collection: collection.to_string(),
            project: project.to_string(),
            rows: ids.len(),
        }),
    }
}
