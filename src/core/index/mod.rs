//! # Index Module
//!
//! Lookup structure for previously built checksum indexes.
//!
//! ## Collision Policy
//! An index document may list the same checksum for several paths (files
//! with identical content). The in-memory [`Index`] keeps one path per
//! checksum: **the record inserted last wins**. Loading a document inserts
//! records in document order, so the last listed path is the one reported.

mod document;

pub use document::{read_records, write_records};

use crate::core::record::FileRecord;
use crate::error::IndexError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Checksum to path map used for duplicate lookup
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: HashMap<String, PathBuf>,
}

impl Index {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from records, in iteration order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FileRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Load an index document from disk
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let records = read_records(path)?;
        let total = records.len();
        let index = Self::from_records(records);
        debug!(
            "Loaded {} records ({} distinct checksums) from {}",
            total,
            index.len(),
            path.display()
        );
        Ok(index)
    }

    /// Insert a record, replacing any path already stored for its checksum.
    ///
    /// Returns the displaced path, if any.
    pub fn insert(&mut self, record: FileRecord) -> Option<PathBuf> {
        self.entries.insert(record.checksum, record.path)
    }

    /// Path recorded for `checksum`
    pub fn lookup(&self, checksum: &str) -> Option<&Path> {
        self.entries.get(checksum).map(PathBuf::as_path)
    }

    pub fn contains(&self, checksum: &str) -> bool {
        self.entries.contains_key(checksum)
    }

    /// Number of distinct checksums
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
