//! Error types for each phase of a run.

use crate::model::EntityKind;
use std::path::PathBuf;

/// Failure while building the symbol database. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("`{name}` is declared inside record `{record}`, which was never discovered")]
    MissingRecord { name: String, record: String },
    #[error("namespace `{name}` cannot be declared inside record `{record}`")]
    NamespaceInRecord { name: String, record: String },
    #[error("`{name}` was discovered as both a {existing} and a {incoming}")]
    KindConflict {
        name: String,
        existing: EntityKind,
        incoming: EntityKind,
    },
}

/// Failure converting one documentation comment to HTML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("malformed reference `{0}`")]
    MalformedReference(String),
    #[error("reference to unknown declaration `{0}`")]
    UnknownReference(String),
}

/// Failure of a single page. The run continues with the next page.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{kind} `{entity}`: {source}")]
    Render {
        entity: String,
        kind: EntityKind,
        #[source]
        source: RenderError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure that stops the whole run.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("giving up after {0} failed writes")]
    TooManyIoFailures(usize),
}
