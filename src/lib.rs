//! # blobmem
//!
//! An in-memory blob backend for tests, with:
//! - A typed key space: category + name, with a singleton `Config` slot
//! - Two-phase writes: stage in a buffer, then publish atomically
//! - Range reads by copy or by streaming reader
//! - Sorted, cancellable snapshot listings
//! - One coarse lock; safe to share across threads
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    dyn Backend (callers)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       MemoryStore                            │
//! │              Mutex<HashMap<(category, name), Bytes>>         │
//! └──────┬───────────────────────┬──────────────────────┬───────┘
//!        │                       │                      │
//!        ▼                       ▼                      ▼
//!  ┌─────────────┐        ┌─────────────┐        ┌─────────────┐
//!  │ WriteBuffer │        │ BlobReader  │        │ NameStream  │
//!  │  (staged)   │        │  (io::Read) │        │ (snapshot)  │
//!  └─────────────┘        └─────────────┘        └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use blobmem::{Category, CancelToken, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let mut buf = store.create();
//! buf.write(b"hello");
//! buf.finalize(Category::Data, "greeting").unwrap();
//!
//! assert_eq!(store.stat(Category::Data, "greeting").unwrap(), 5);
//! let names: Vec<String> = store.list(Category::Data, &CancelToken::new()).collect();
//! assert_eq!(names, vec!["greeting".to_string()]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod blob;
pub mod listing;
pub mod engine;
pub mod backend;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BlobError, Result};
pub use config::Config;
pub use key::{Category, Handle};
pub use blob::{BlobReader, WriteBuffer};
pub use listing::{CancelToken, FeedIntoIter, FeedIter, ListFeed, NameStream};
pub use engine::MemoryStore;
pub use backend::{Backend, Blob, BlobInfo};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of blobmem
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
