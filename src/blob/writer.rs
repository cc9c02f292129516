//! Write Buffer
//!
//! Accumulates bytes for a blob that is not yet published.

use std::fmt;
use std::io;

use bytes::{BufMut, BytesMut};

use crate::engine::MemoryStore;
use crate::error::Result;
use crate::key::Category;

/// Staged write into a MemoryStore
///
/// Writes always succeed. The content is invisible to readers, stat and
/// listing until `finalize` publishes it. `finalize` takes the buffer by
/// value, so a buffer can be published at most once; if publishing fails
/// with `AlreadyExists` the staged bytes are dropped.
pub struct WriteBuffer {
    store: MemoryStore,
    data: BytesMut,
}

impl WriteBuffer {
    pub(crate) fn new(store: MemoryStore) -> Self {
        Self {
            store,
            data: BytesMut::new(),
        }
    }

    /// Append bytes, returning how many were accepted (always all of them)
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        self.data.put_slice(bytes);
        bytes.len()
    }

    /// Bytes accumulated so far
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Publish the staged bytes under (category, name)
    pub fn finalize(self, category: Category, name: &str) -> Result<()> {
        tracing::debug!(
            "Finalize write buffer ({} bytes) as {} {:?}",
            self.data.len(),
            category,
            name
        );
        self.store.insert(category, name, self.data.freeze())
    }
}

impl io::Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(WriteBuffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for WriteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteBuffer")
            .field("size", &self.data.len())
            .finish()
    }
}
