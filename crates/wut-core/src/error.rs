//! Error type for the wut-core layers.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The collection lookup that follows an insert did not return exactly
    /// one row. The uniqueness constraint makes this unreachable on a healthy
    /// store.
    #[error(
        "universe is inconsistent: collection {collection:?} in project {project:?} resolved to {rows} rows"
    )]
    Consistency {
        collection: String,
        project: String,
        rows: usize,
    },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ingestion plan: {0}")]
    Plan(#[from] serde_yaml::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
