//! Index document writer.

use super::RecordSink;
use crate::core::index::write_records;
use crate::core::record::FileRecord;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Collects records and serializes them to `destination` on finish.
///
/// Nothing is written unless the whole run succeeds.
pub struct IndexWriter {
    destination: PathBuf,
    records: Vec<FileRecord>,
}

impl IndexWriter {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            records: Vec::new(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl RecordSink for IndexWriter {
    /// Path of the written document
    type Output = PathBuf;

    fn accept(&mut self, record: FileRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn finish(self) -> Result<PathBuf> {
        write_records(&self.destination, &self.records)?;
        info!(
            "Wrote {} records to {}",
            self.records.len(),
            self.destination.display()
        );
        Ok(self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::read_records;
    use crate::error::{DupfindError, IndexError};
    use tempfile::TempDir;

    #[test]
    fn finish_writes_records_in_arrival_order() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("index.json");
        let mut writer = IndexWriter::new(&destination);

        writer.accept(FileRecord::new("z.txt", "01")).unwrap();
        writer.accept(FileRecord::new("a.txt", "02")).unwrap();
        let written = writer.finish().unwrap();

        assert_eq!(written, destination);
        assert_eq!(
            read_records(&destination).unwrap(),
            vec![FileRecord::new("z.txt", "01"), FileRecord::new("a.txt", "02")]
        );
    }

    #[test]
    fn nothing_is_written_before_finish() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("index.json");
        let mut writer = IndexWriter::new(&destination);

        writer.accept(FileRecord::new("a.txt", "01")).unwrap();
        drop(writer);

        assert!(!destination.exists());
    }

    #[test]
    fn unwritable_destination_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let writer = IndexWriter::new(temp_dir.path().join("missing").join("index.json"));

        let result = writer.finish();

        assert!(matches!(
            result,
            Err(DupfindError::Index(IndexError::Create { .. }))
        ));
    }
}
