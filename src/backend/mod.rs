//! Backend Module
//!
//! The contract every blob backend implements, and the memory store's
//! implementation of it.
//!
//! Code written against `dyn Backend` can run with a `MemoryStore` in
//! tests and a networked backend in production. The store itself uses
//! no dynamic dispatch; this module is the only seam that does.

mod memory;
mod traits;

pub use traits::{Backend, Blob, BlobInfo};
