use thiserror::Error;

/// Main error type for the payportz-storage crate.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A stored document could not be encoded or decoded.
    #[error("Serialization error for key '{key}': {source}")]
    Serialization {
        /// Key of the document
        key: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters a backend cannot store.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
