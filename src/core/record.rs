//! The (path, checksum) pair produced for every hashed file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A hashed file.
///
/// `path` is exactly what the walker produced: relative roots give relative
/// paths. `checksum` is a lowercase hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub checksum: String,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, checksum: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            checksum: checksum.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_path_and_checksum_fields() {
        let record = FileRecord::new("docs/a.txt", "abc123");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["path"], "docs/a.txt");
        assert_eq!(json["checksum"], "abc123");
    }
}
