use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LayerError {
    #[error("query has an empty where clause")]
    EmptyWhereClause,
    #[error("no extent known for layer {url}")]
    UnknownLayer { url: String },
    #[error("layer {url} has an empty extent")]
    EmptyExtent { url: String },
}
