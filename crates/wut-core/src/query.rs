//! Query engine: glob patterns in, grouped [`UniverseView`] out.
//!
//! Patterns use `*` as the only wildcard and are evaluated with SQLite
//! `GLOB`, so matching is case-sensitive and byte-wise: `CESM*` matches
//! `CESM2` but not `cesm2`. Every other character is literal.
//!
//! Term patterns are OR-combined; the optional project pattern is AND-ed on
//! top. All patterns are bound as statement parameters.

use crate::error::Result;
use crate::types::{TermRow, UniverseView};
use rusqlite::{params_from_iter, Connection};

const SELECT: &str = "SELECT TermName, CollectionName, ProjectName \
FROM Terms INNER JOIN Collections ON Terms.CollectionId = Collections.CollectionId";

/// Translate a user glob (`*` only) into a SQLite `GLOB` pattern.
///
/// `?`, `[` and `]` are GLOB metacharacters in SQLite; they are wrapped in a
/// bracket class so they match themselves.
pub fn glob_to_store_pattern(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());
    for c in glob.chars() {
        match c {
            '?' => out.push_str("[?]"),
            '[' => out.push_str("[[]"),
            ']' => out.push_str("[]]"),
            other => out.push(other),
        }
    }
    out
}

/// Run a pattern query and group the matching rows.
///
/// An empty pattern list matches nothing. No match is an empty view, not an
/// error.
pub fn query_universe<S: AsRef<str>>(
    conn: &Connection,
    terms: &[S],
    project: Option<&str>,
) -> Result<UniverseView> {
    if terms.is_empty() {
        return Ok(UniverseView::default());
    }
    let rows = query_rows(conn, terms, project)?;
    tracing::debug!(patterns = terms.len(), ?project, rows = rows.len(), "queried universe");
    Ok(UniverseView::from_rows(rows))
}

/// The flat joined rows behind [`query_universe`], ordered by project.
pub fn query_rows<S: AsRef<str>>(
    conn: &Connection,
    terms: &[S],
    project: Option<&str>,
) -> Result<Vec<TermRow>> {
    let mut patterns: Vec<String> = terms
        .iter()
        .map(|t| glob_to_store_pattern(t.as_ref()))
        .collect();
    let sql = build_sql(patterns.len(), project.is_some());
    if let Some(project) = project {
        patterns.push(glob_to_store_pattern(project));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(patterns.iter()), |row| {
            Ok(TermRow {
                term: row.get(0)?,
                collection: row.get(1)?,
                project: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// `?1 .. ?n` are the term patterns, `?n+1` the project pattern.
fn build_sql(term_count: usize, with_project: bool) -> String {
    let terms = (1..=term_count)
        .map(|i| format!("TermName GLOB ?{i}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let predicate = if with_project {
        format!("(ProjectName GLOB ?{}) AND ({terms})", term_count + 1)
    } else {
        terms
    };
    format!("{SELECT} WHERE {predicate} ORDER BY ProjectName, CollectionName, TermName")
}
