//! Engine Module
//!
//! The blob map and the lock that guards it.
//!
//! ## Responsibilities
//! - Own the authoritative (category, name) → bytes mapping
//! - Reject overwrites of existing keys
//! - Serve range reads, stats, removals and listing snapshots
//! - Hand out write buffers that publish back into the map

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::blob::{BlobReader, WriteBuffer};
use crate::config::Config;
use crate::error::{BlobError, Result};
use crate::key::{Category, EntryKey};
use crate::listing::{CancelToken, ListFeed, NameStream};

/// In-memory blob store
///
/// ## Concurrency Model: one coarse lock
///
/// - Every operation takes `data` for its whole critical section
/// - Nothing inside a critical section blocks; hold time is a map lookup
///   plus a copy or a sort
/// - Listing releases the lock before the first name is delivered
///
/// Cloning the store clones the handle: clones share one map. Separate
/// `MemoryStore::new()` calls give independent stores.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

struct Shared {
    /// Store configuration
    config: Config,

    /// Published blobs; content is immutable once inserted
    data: Mutex<HashMap<EntryKey, Bytes>>,
}

impl MemoryStore {
    /// Create an empty store with the default config
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty store with the given config
    pub fn with_config(config: Config) -> Self {
        tracing::info!("Created memory store ({})", config.location);
        Self {
            shared: Arc::new(Shared {
                config,
                data: Mutex::new(HashMap::new()),
            }),
        }
    }

    // =========================================================================
    // Blob Map Operations
    // =========================================================================

    /// Whether a blob is stored under (category, name)
    pub fn exists(&self, category: Category, name: &str) -> bool {
        let key = EntryKey::new(category, name);
        let data = self.shared.data.lock();

        tracing::debug!("Test {} {:?}", key.category, key.name);
        data.contains_key(&key)
    }

    /// Insert a blob if the key is free
    ///
    /// Fails with `AlreadyExists` and leaves the stored bytes untouched
    /// when the key is taken.
    pub fn insert(&self, category: Category, name: &str, bytes: impl Into<Bytes>) -> Result<()> {
        let key = EntryKey::new(category, name);
        let bytes = bytes.into();
        let mut data = self.shared.data.lock();

        match data.entry(key) {
            Entry::Occupied(occupied) => Err(occupied.key().already_exists()),
            Entry::Vacant(vacant) => {
                tracing::debug!(
                    "Insert {} {:?} ({} bytes)",
                    vacant.key().category,
                    vacant.key().name,
                    bytes.len()
                );
                vacant.insert(bytes);
                Ok(())
            }
        }
    }

    /// Read a range of a blob
    ///
    /// - `offset == size` yields an empty slice
    /// - `offset > size` fails with `OffsetOutOfRange`
    /// - `length == 0` reads to the end
    /// - a `length` running past the end is clamped
    ///
    /// The returned `Bytes` shares the stored buffer; no copy is made.
    pub fn read(&self, category: Category, name: &str, offset: u64, length: u64) -> Result<Bytes> {
        let key = EntryKey::new(category, name);
        let data = self.shared.data.lock();

        tracing::debug!(
            "Read {} {:?} offset {} len {}",
            key.category,
            key.name,
            offset,
            length
        );

        let blob = data.get(&key).ok_or_else(|| key.not_found())?;
        let start = check_offset(blob, offset)?;
        let rest = blob.slice(start..);

        if length > 0 && length < rest.len() as u64 {
            return Ok(rest.slice(..length as usize));
        }
        Ok(rest)
    }

    /// Copy a blob into `dest`, starting at `offset`
    ///
    /// Returns the number of bytes copied. When `dest` is larger than what
    /// is left in the blob, the remaining bytes are still copied and the
    /// call fails with `UnexpectedShort` carrying that count.
    pub fn read_into(
        &self,
        category: Category,
        name: &str,
        offset: u64,
        dest: &mut [u8],
    ) -> Result<usize> {
        let key = EntryKey::new(category, name);
        let data = self.shared.data.lock();

        tracing::debug!(
            "Load {} {:?} offset {} len {}",
            key.category,
            key.name,
            offset,
            dest.len()
        );

        let blob = data.get(&key).ok_or_else(|| key.not_found())?;
        let start = check_offset(blob, offset)?;
        let rest = &blob[start..];

        let copied = dest.len().min(rest.len());
        dest[..copied].copy_from_slice(&rest[..copied]);

        if dest.len() > rest.len() {
            return Err(BlobError::UnexpectedShort {
                copied,
                requested: dest.len(),
            });
        }
        Ok(copied)
    }

    /// Size of a stored blob in bytes
    pub fn stat(&self, category: Category, name: &str) -> Result<u64> {
        let key = EntryKey::new(category, name);
        let data = self.shared.data.lock();

        tracing::debug!("Stat {} {:?}", key.category, key.name);

        data.get(&key)
            .map(|blob| blob.len() as u64)
            .ok_or_else(|| key.not_found())
    }

    /// Remove a blob
    pub fn remove(&self, category: Category, name: &str) -> Result<()> {
        let key = EntryKey::new(category, name);
        let mut data = self.shared.data.lock();

        tracing::debug!("Remove {} {:?}", key.category, key.name);

        match data.remove(&key) {
            Some(_) => Ok(()),
            None => Err(key.not_found()),
        }
    }

    /// Drop every blob in the store
    pub fn reset(&self) {
        let mut data = self.shared.data.lock();
        let count = data.len();
        data.clear();

        tracing::info!("Reset memory store, dropped {} blobs", count);
    }

    /// List the names stored under `category`
    ///
    /// The names are collected and sorted under the lock; delivery happens
    /// after it is released, so the stream does not see later changes.
    pub fn list(&self, category: Category, cancel: &CancelToken) -> NameStream {
        let names = {
            let data = self.shared.data.lock();
            let mut names: Vec<String> = data
                .keys()
                .filter(|key| key.category == category)
                .map(|key| key.name.clone())
                .collect();
            names.sort_unstable();
            names
        };

        tracing::debug!("List {}: {} names", category, names.len());
        NameStream::new(category, names, cancel.clone())
    }

    /// `list`, delivered by a producer thread over a channel bounded by
    /// `Config::list_channel_capacity`
    pub fn list_feed(&self, category: Category, cancel: &CancelToken) -> ListFeed {
        self.list(category, cancel)
            .into_channel(self.shared.config.list_channel_capacity)
    }

    // =========================================================================
    // Staged Writes and Readers
    // =========================================================================

    /// Start a staged write
    ///
    /// Nothing is visible in the store until `WriteBuffer::finalize`.
    pub fn create(&self) -> WriteBuffer {
        tracing::debug!("Create new write buffer");
        WriteBuffer::new(self.clone())
    }

    /// Open a streaming reader over a range of a blob
    ///
    /// Same range rules as `read`.
    pub fn reader(
        &self,
        category: Category,
        name: &str,
        offset: u64,
        length: u64,
    ) -> Result<BlobReader> {
        let bytes = self.read(category, name, offset, length)?;
        Ok(BlobReader::new(bytes))
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.shared.data.lock().len()
    }

    /// Whether the store holds no blobs
    pub fn is_empty(&self) -> bool {
        self.shared.data.lock().is_empty()
    }

    /// Sum of all blob sizes
    pub fn total_bytes(&self) -> u64 {
        self.shared
            .data
            .lock()
            .values()
            .map(|blob| blob.len() as u64)
            .sum()
    }

    /// Label describing where blobs live
    pub fn location(&self) -> &str {
        &self.shared.config.location
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.shared.config
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("location", &self.location())
            .field("blob_count", &self.len())
            .finish()
    }
}

/// Validate `offset` against a blob and convert it to an index
fn check_offset(blob: &Bytes, offset: u64) -> Result<usize> {
    let size = blob.len() as u64;
    if offset > size {
        return Err(BlobError::OffsetOutOfRange { offset, size });
    }
    Ok(offset as usize)
}
