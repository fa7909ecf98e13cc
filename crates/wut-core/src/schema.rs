//! Schema manager: the two-table layout of the universe.
//!
//! ```text
//! Collections(CollectionId PK, CollectionName, ProjectName)   UNIQUE(CollectionName, ProjectName)
//!      1
//!      │
//!      n
//! Terms(TermId PK, TermName, CollectionId FK)                 UNIQUE(TermName, CollectionId)
//! ```
//!
//! Both invariants live in SQLite itself, not only in the ingestion code.

use crate::error::Result;
use rusqlite::Connection;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Collections(
    CollectionId   INTEGER PRIMARY KEY,
    CollectionName TEXT NOT NULL,
    ProjectName    TEXT NOT NULL,
    UNIQUE(CollectionName, ProjectName)
);
CREATE TABLE IF NOT EXISTS Terms(
    TermId       INTEGER PRIMARY KEY,
    TermName     TEXT NOT NULL,
    CollectionId INTEGER NOT NULL,
    FOREIGN KEY(CollectionId) REFERENCES Collections(CollectionId),
    UNIQUE(TermName, CollectionId)
);
"#;

/// Create the `Collections` and `Terms` tables if they are absent.
///
/// Safe to call on an existing, populated store. Also turns on foreign-key
/// enforcement, which SQLite tracks per connection.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
