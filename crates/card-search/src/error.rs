use std::path::PathBuf;

/// Errors raised while configuring the parser or feeding it post-parse results.
///
/// Problems inside a query string are never reported through this type; they
/// are collected as [`crate::query::QueryError`] records instead.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
