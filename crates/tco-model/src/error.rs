//! Error types for TCO Model
//!
//! Feed errors are fatal: a structurally invalid document is never partially
//! recovered. Missing optional fields inside an otherwise valid document are
//! not errors; the consuming stage decides what to skip.

use std::path::PathBuf;

/// Feed decoding errors
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Document is not valid JSON or does not match the expected shape
    #[error("malformed feed document: {0}")]
    Json(#[from] serde_json::Error),

    /// Feed file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from a binding
    #[error("binding {index} lacks column `{column}`")]
    MissingColumn { index: usize, column: &'static str },

    /// Cost value is not a decimal integer
    #[error("binding {index}: cost `{value}` for `{id}` is not an integer")]
    InvalidCost {
        index: usize,
        id: String,
        value: String,
    },
}

/// Digest parsing errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DigestError {
    /// Invalid hex encoding
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Wrong number of bytes
    #[error("invalid digest length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
