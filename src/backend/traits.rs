//! Backend traits

use std::io::{Read, Write};

use crate::error::Result;
use crate::key::{Category, Handle};
use crate::listing::CancelToken;

/// Metadata about a stored blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobInfo {
    /// Size in bytes
    pub size: u64,
}

/// A staged write obtained from `Backend::create`
pub trait Blob: Write + Send {
    /// Bytes written so far
    fn size(&self) -> usize;

    /// Publish the written bytes under (category, name)
    ///
    /// Consumes the writer. Fails with `AlreadyExists` if the key is taken.
    fn finalize(self: Box<Self>, category: Category, name: &str) -> Result<()>;
}

/// Blob storage backend
///
/// Implementations must be safe to share across threads.
pub trait Backend: Send + Sync {
    /// Human-readable description of where blobs are stored
    fn location(&self) -> String;

    /// Whether a blob exists
    fn test(&self, category: Category, name: &str) -> Result<bool>;

    /// Start a new staged write
    fn create(&self) -> Result<Box<dyn Blob>>;

    /// Reader over `length` bytes starting at `offset` (0 = to the end)
    fn get_reader(
        &self,
        category: Category,
        name: &str,
        offset: u64,
        length: u64,
    ) -> Result<Box<dyn Read + Send>>;

    /// Fill `buf` from the blob starting at `offset`
    ///
    /// Fails with `UnexpectedShort` when the blob ends before `buf` is
    /// full; the bytes that were available are still copied.
    fn load(&self, handle: &Handle, buf: &mut [u8], offset: u64) -> Result<usize>;

    /// Size and metadata of a blob
    fn stat(&self, handle: &Handle) -> Result<BlobInfo>;

    /// Remove a blob
    fn remove(&self, category: Category, name: &str) -> Result<()>;

    /// Sorted snapshot of names in `category`, stopping once `cancel` fires
    fn list(&self, category: Category, cancel: &CancelToken) -> Box<dyn Iterator<Item = String> + Send>;

    /// Remove everything
    fn delete(&self) -> Result<()>;
}
