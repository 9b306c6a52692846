//! # Sink Module
//!
//! Consumers at the end of the record stream.
//!
//! - `IndexWriter` - collects every record and writes an index document
//! - `DuplicateFinder` - looks each record up in a loaded index and reports
//!   the ones already present

mod build;
mod find;

pub use build::IndexWriter;
pub use find::{DisplayMode, Duplicate, DuplicateFinder, DuplicateLine};

use crate::core::record::FileRecord;
use crate::error::Result;

/// Trait for record stream consumers
pub trait RecordSink {
    /// What the sink produces once the stream is exhausted
    type Output;

    /// Handle one record. An error stops the run.
    fn accept(&mut self, record: FileRecord) -> Result<()>;

    /// Called once the stream has closed and the walk succeeded
    fn finish(self) -> Result<Self::Output>;
}

/// Collects records in arrival order
impl RecordSink for Vec<FileRecord> {
    type Output = Vec<FileRecord>;

    fn accept(&mut self, record: FileRecord) -> Result<()> {
        self.push(record);
        Ok(())
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self)
    }
}
