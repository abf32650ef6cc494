use std::path::PathBuf;
use thiserror::Error;

/// Typed failures surfaced by the core library.
///
/// Parsing itself never fails (unmatched lines become passthrough comments),
/// so these only cover the edges: configuration, decoding and file I/O.
#[derive(Debug, Error)]
pub enum PlcDocError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not decode {path} as UTF-8 or {fallback}")]
    Decode { path: PathBuf, fallback: &'static str },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chunk budget must be positive, got {0} MB")]
    InvalidBudget(f64),
}

impl PlcDocError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
