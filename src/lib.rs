//! # dupfind
//!
//! Builds a content-checksum index of a directory tree and finds files in
//! another tree whose content is already indexed.
//!
//! ## Architecture
//! - `core` - The walker, the hashing worker pool and the record sinks
//! - `events` - Progress events for whatever front end drives the pipeline
//! - `error` - Error types
//!
//! ## Example
//! ```rust,ignore
//! use dupfind::core::{IndexWriter, Pipeline};
//!
//! let pipeline = Pipeline::builder().root("photos").workers(8).build()?;
//! let written = pipeline.run(IndexWriter::new("photos.json"))?.output;
//! ```

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DupfindError, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application.
///
/// Logs go to stderr. `RUST_LOG` takes precedence; otherwise warnings and
/// errors are shown, or everything down to debug when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed when embedded in another program
    let _ = tracing::subscriber::set_global_default(subscriber);
}
