//! Blob Module
//!
//! Staged writes and streaming reads.
//!
//! ## Two-phase write
//! ```text
//!   create() ──► WriteBuffer (private, BytesMut)
//!                   │ write / write / ...
//!                   ▼
//!               finalize(category, name) ──(lock)──► blob map (Bytes)
//! ```
//!
//! The buffer is owned by its creator until `finalize`, which consumes it.
//! Publishing is one map insertion under the store lock.

mod reader;
mod writer;

pub use reader::BlobReader;
pub use writer::WriteBuffer;
