//! Write Buffer Tests
//!
//! Tests verify:
//! - Appending and size tracking
//! - Staged bytes stay private until finalize
//! - Finalize publishes atomically and rejects taken keys
//! - io::Write integration

use std::io::Write;
use std::thread;

use blobmem::{Category, CancelToken, MemoryStore};

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_new_buffer_is_empty() {
    let store = MemoryStore::new();
    let buf = store.create();

    assert_eq!(buf.size(), 0);
}

#[test]
fn test_write_accepts_everything() {
    let store = MemoryStore::new();
    let mut buf = store.create();

    assert_eq!(buf.write(b"hello"), 5);
    assert_eq!(buf.write(b""), 0);
    assert_eq!(buf.write(b" world"), 6);
    assert_eq!(buf.size(), 11);
}

#[test]
fn test_io_write() {
    let store = MemoryStore::new();
    let mut buf = store.create();

    write!(buf, "{}-{}", "abc", 42).unwrap();
    Write::write_all(&mut buf, b"!").unwrap();
    Write::flush(&mut buf).unwrap();

    assert_eq!(buf.size(), 7);
    buf.finalize(Category::Data, "fmt").unwrap();
    assert_eq!(store.read(Category::Data, "fmt", 0, 0).unwrap(), &b"abc-42!"[..]);
}

#[test]
fn test_large_write() {
    let store = MemoryStore::new();
    let mut buf = store.create();
    let chunk = vec![0xABu8; 4096];

    for _ in 0..64 {
        buf.write(&chunk);
    }

    assert_eq!(buf.size(), 64 * 4096);
    buf.finalize(Category::Data, "large").unwrap();
    assert_eq!(store.stat(Category::Data, "large").unwrap(), 64 * 4096);
}

// =============================================================================
// Visibility Tests
// =============================================================================

#[test]
fn test_staged_bytes_are_private() {
    let store = MemoryStore::new();
    let mut buf = store.create();
    buf.write(b"pending");

    assert!(store.is_empty());
    assert!(!store.exists(Category::Data, "pending"));
    assert!(store.stat(Category::Data, "pending").unwrap_err().is_not_found());
    assert_eq!(store.list(Category::Data, &CancelToken::new()).count(), 0);

    buf.finalize(Category::Data, "pending").unwrap();

    assert!(store.exists(Category::Data, "pending"));
}

#[test]
fn test_dropped_buffer_publishes_nothing() {
    let store = MemoryStore::new();
    {
        let mut buf = store.create();
        buf.write(b"abandoned");
    }

    assert!(store.is_empty());
}

// =============================================================================
// Finalize Tests
// =============================================================================

#[test]
fn test_finalize_publishes() {
    let store = MemoryStore::new();
    let mut buf = store.create();
    buf.write(&[1, 2, 3]);

    buf.finalize(Category::Snapshot, "snap").unwrap();

    assert_eq!(store.stat(Category::Snapshot, "snap").unwrap(), 3);
    assert_eq!(store.read(Category::Snapshot, "snap", 0, 0).unwrap(), &[1u8, 2, 3][..]);
}

#[test]
fn test_finalize_empty_buffer() {
    let store = MemoryStore::new();

    store.create().finalize(Category::Lock, "empty").unwrap();

    assert!(store.exists(Category::Lock, "empty"));
    assert_eq!(store.stat(Category::Lock, "empty").unwrap(), 0);
}

#[test]
fn test_finalize_existing_key_fails() {
    let store = MemoryStore::new();
    store.insert(Category::Data, "taken", b"original".to_vec()).unwrap();

    let mut buf = store.create();
    buf.write(b"replacement");
    let err = buf.finalize(Category::Data, "taken").unwrap_err();

    assert!(err.is_already_exists());
    assert_eq!(store.read(Category::Data, "taken", 0, 0).unwrap(), &b"original"[..]);
}

#[test]
fn test_finalize_config_ignores_name() {
    let store = MemoryStore::new();

    let mut first = store.create();
    first.write(b"X");
    first.finalize(Category::Config, "ignored-name-1").unwrap();

    let mut second = store.create();
    second.write(b"Y");
    let err = second.finalize(Category::Config, "ignored-name-2").unwrap_err();

    assert!(err.is_already_exists());
    assert_eq!(store.read(Category::Config, "anything", 0, 0).unwrap(), &b"X"[..]);
}

#[test]
fn test_buffers_on_different_threads() {
    let store = MemoryStore::new();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                let mut buf = store.create();
                for i in 0..10u8 {
                    buf.write(&[t as u8, i]);
                }
                buf.finalize(Category::Data, &format!("writer{}", t)).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for t in 0..4 {
        assert_eq!(store.stat(Category::Data, &format!("writer{}", t)).unwrap(), 20);
    }
}
