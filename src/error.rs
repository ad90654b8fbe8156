use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Malformed document {source_name}: {reason}")]
    MalformedDocument { source_name: String, reason: String },

    #[error("Failed to read course store {}: {source}", path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode course store: {0}")]
    StoreDecode(#[source] serde_json::Error),

    #[error("Failed to write course store {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode course store: {0}")]
    StoreEncode(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Store failures abort the current operation; everything else is
    /// recovered by skipping the offending source.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            AppError::StoreRead { .. }
                | AppError::StoreDecode(_)
                | AppError::StoreWrite { .. }
                | AppError::StoreEncode(_)
        )
    }
}
