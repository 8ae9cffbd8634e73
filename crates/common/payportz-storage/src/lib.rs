#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Blob storage shared by the PayPortz multisig and escrow services.
//!
//! Records are kept as whole JSON documents under string keys, read and
//! written wholesale. There are no partial updates and no transactions;
//! callers that need read-modify-write safety serialise themselves.

/// Error types for storage operations.
pub mod error;
/// Record identifier generation.
pub mod id;
/// The `BlobStore` trait and its backends.
pub mod storage;

pub use error::StorageError;
pub use id::generate_record_id;
pub use storage::{read_json, write_json, BlobStore, FileBlobStore, MemoryBlobStore, StorageBackend};
