use thiserror::Error;

/// Errors surfaced by the directory loader.
///
/// Only file-level problems are errors. A single malformed row is skipped
/// with a warning and never aborts the load.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read directory file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse directory file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("directory file {path} must contain a top-level JSON array of row objects")]
    NotAnArray { path: String },
}
