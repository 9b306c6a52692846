//! # Error Module
//!
//! Error types for index building and duplicate lookup.
//!
//! ## Design Principles
//! - **Never panic** on filesystem data - return errors instead
//! - **Include context** - every error names the path it concerns
//! - **Separate severities** - per-file errors are recovered by the worker
//!   pool, everything else reaches the CLI as a fatal error

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DupfindError {
    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("Failed to write duplicate report: {0}")]
    Report(#[source] std::io::Error),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to start {name} thread: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The {0} thread panicked")]
    ThreadPanicked(&'static str),

    #[error("All hashing workers exited before the walk finished ({panicked} panicked)")]
    WorkersExhausted { panicked: usize },
}

/// Errors that occur while walking the directory tree
#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to traverse {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Per-file errors raised while computing a checksum.
///
/// The worker pool logs these and moves on to the next path.
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// The file the error concerns
    pub fn path(&self) -> &std::path::Path {
        match self {
            HashError::Open { path, .. } | HashError::Read { path, .. } => path,
        }
    }
}

/// Errors that occur loading or writing an index document
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read index file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create index file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write index file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize index for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DupfindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_error_includes_path() {
        let error = WalkError::RootNotFound {
            path: PathBuf::from("/data/archive"),
        };
        assert!(error.to_string().contains("/data/archive"));
    }

    #[test]
    fn hash_error_exposes_offending_path() {
        let error = HashError::Open {
            path: PathBuf::from("/data/locked.bin"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(error.path(), std::path::Path::new("/data/locked.bin"));
        assert!(error.to_string().contains("/data/locked.bin"));
    }

    #[test]
    fn index_parse_error_names_the_document() {
        let source = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let error = IndexError::Parse {
            path: PathBuf::from("/tmp/index.json"),
            source,
        };
        let message = error.to_string();
        assert!(message.contains("/tmp/index.json"));
        assert!(message.contains("malformed"));
    }

    #[test]
    fn top_level_error_wraps_index_error() {
        let error: DupfindError = IndexError::Read {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert!(error.to_string().starts_with("Index error:"));
    }
}
