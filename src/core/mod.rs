//! # Core Module
//!
//! The checksum indexing engine, independent of the CLI.
//!
//! ## Modules
//! - `walker` - Enumerates files under a root directory
//! - `hasher` - Computes content checksums
//! - `pipeline` - Runs the walker and the hashing workers concurrently
//! - `index` - Loads and writes index documents
//! - `sink` - Consumes the record stream (build an index, find duplicates)

pub mod hasher;
pub mod index;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod walker;

// Re-export commonly used types
pub use index::Index;
pub use pipeline::{Pipeline, PipelineResult};
pub use record::FileRecord;
pub use sink::{DisplayMode, Duplicate, DuplicateFinder, IndexWriter, RecordSink};
