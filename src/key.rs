//! Keys
//!
//! The typed key space of the store: a `Category` plus a name.
//!
//! `Category::Config` is a singleton slot. Whatever name a caller passes
//! for it, the entry lives under the empty name. `EntryKey::new` is the
//! only way the engine builds a map key, so the rewrite applies to every
//! operation.

use std::fmt;

use crate::error::{BlobError, Result};

/// Closed set of blob kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Data,
    Key,
    Lock,
    Snapshot,
    Index,
    /// Singleton: one slot per store
    Config,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: [Category; 6] = [
        Category::Data,
        Category::Key,
        Category::Lock,
        Category::Snapshot,
        Category::Index,
        Category::Config,
    ];

    /// Whether the name component is ignored for this category
    pub fn is_singleton(self) -> bool {
        matches!(self, Category::Config)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Data => "data",
            Category::Key => "key",
            Category::Lock => "lock",
            Category::Snapshot => "snapshot",
            Category::Index => "index",
            Category::Config => "config",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a blob as passed in by backend callers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    pub category: Category,
    pub name: String,
}

impl Handle {
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    /// Check the handle can address a blob
    ///
    /// Every category except the singleton needs a non-empty name.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() && !self.category.is_singleton() {
            return Err(BlobError::InvalidHandle(format!(
                "empty name for category {}",
                self.category
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_singleton() {
            write!(f, "<{}>", self.category)
        } else {
            write!(f, "<{}/{}>", self.category, self.name)
        }
    }
}

/// Map key after the singleton rewrite
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct EntryKey {
    pub(crate) category: Category,
    pub(crate) name: String,
}

impl EntryKey {
    pub(crate) fn new(category: Category, name: &str) -> Self {
        let name = if category.is_singleton() {
            String::new()
        } else {
            name.to_string()
        };
        Self { category, name }
    }

    pub(crate) fn not_found(&self) -> BlobError {
        BlobError::NotFound {
            category: self.category,
            name: self.name.clone(),
        }
    }

    pub(crate) fn already_exists(&self) -> BlobError {
        BlobError::AlreadyExists {
            category: self.category,
            name: self.name.clone(),
        }
    }
}

impl From<&Handle> for EntryKey {
    fn from(handle: &Handle) -> Self {
        EntryKey::new(handle.category, &handle.name)
    }
}
