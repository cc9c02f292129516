//! Listing Module
//!
//! Snapshot enumeration of the names stored under one category.
//!
//! ## Responsibilities
//! - Deliver a sorted snapshot of names without holding the store lock
//! - Stop promptly once the caller cancels
//! - Optionally feed the names through a channel from a producer thread
//!
//! ## Lifecycle
//! ```text
//!   MemoryStore::list ──(lock, collect, sort, unlock)──► NameStream
//!                                                           │
//!                         pull: Iterator::next ◄────────────┤
//!                                                           │
//!                         push: into_channel ──► ListFeed (thread + receiver)
//! ```

mod cancel;
mod stream;

pub use cancel::CancelToken;
pub use stream::{FeedIntoIter, FeedIter, ListFeed, NameStream};
