//! Error types for blobmem
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

use crate::key::Category;

/// Result type alias using BlobError
pub type Result<T> = std::result::Result<T, BlobError>;

/// Unified error type for blobmem operations
///
/// Every variant is a local, recoverable condition. A failed operation
/// leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("{category} {name:?} already present")]
    AlreadyExists { category: Category, name: String },

    #[error("no such data: {category} {name:?}")]
    NotFound { category: Category, name: String },

    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    // -------------------------------------------------------------------------
    // Range Errors
    // -------------------------------------------------------------------------
    #[error("offset {offset} beyond end of blob ({size} bytes)")]
    OffsetOutOfRange { offset: u64, size: u64 },

    /// The destination buffer was larger than the bytes left in the blob.
    /// `copied` bytes were still written into the buffer.
    #[error("unexpected short read: copied {copied} of {requested} bytes")]
    UnexpectedShort { copied: usize, requested: usize },
}

impl BlobError {
    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlobError::NotFound { .. })
    }

    /// True for `AlreadyExists`
    pub fn is_already_exists(&self) -> bool {
        matches!(self, BlobError::AlreadyExists { .. })
    }

    /// Bytes copied before a short read, if this is one
    pub fn short_count(&self) -> Option<usize> {
        match self {
            BlobError::UnexpectedShort { copied, .. } => Some(*copied),
            _ => None,
        }
    }
}
