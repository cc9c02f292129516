//! Blob Reader
//!
//! `io::Read` over a range of a published blob.

use std::io::{self, Read};

use bytes::{Buf, Bytes};

/// Streaming reader over a blob range
///
/// Holds its own reference to the bytes, so removing the blob from the
/// store afterwards does not affect an open reader.
#[derive(Debug, Clone)]
pub struct BlobReader {
    bytes: Bytes,
}

impl BlobReader {
    pub(crate) fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Bytes not yet read
    pub fn remaining(&self) -> usize {
        self.bytes.remaining()
    }

    /// Unread part of the range, without copying
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl Read for BlobReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.bytes.remaining());
        self.bytes.copy_to_slice(&mut buf[..n]);
        Ok(n)
    }
}
