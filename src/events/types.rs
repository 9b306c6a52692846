//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the checksum pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory walk events
    Walk(WalkEvent),
    /// Hashing worker events
    Hash(HashEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events from the path walker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalkEvent {
    /// Walking has started at the given root
    Started { root: PathBuf },
    /// A file was discovered and queued for hashing
    FileFound { path: PathBuf },
    /// A traversal error was skipped (only under the skip policy)
    Error { path: PathBuf, message: String },
    /// Walking finished
    Completed { files_found: usize },
}

/// Events from the hashing workers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// A file was hashed
    FileHashed { worker: usize, path: PathBuf },
    /// A file could not be hashed and was skipped
    Error { worker: usize, path: PathBuf, message: String },
    /// A worker drained the path queue and exited
    WorkerFinished { worker: usize },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started { workers: usize },
    /// Every worker has finished and the record stream is closed
    Completed { summary: RunSummary },
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files discovered by the walker
    pub files_found: usize,
    /// Files hashed successfully
    pub files_hashed: usize,
    /// Files skipped because of open or read errors
    pub files_skipped: usize,
    /// Traversal errors skipped under the skip policy
    pub traversal_errors: usize,
    /// Workers that terminated by panicking
    pub workers_panicked: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Hash(HashEvent::FileHashed {
            worker: 2,
            path: PathBuf::from("/data/a.txt"),
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Hash(HashEvent::FileHashed { worker, path }) => {
                assert_eq!(worker, 2);
                assert_eq!(path, PathBuf::from("/data/a.txt"));
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn run_summary_is_serializable() {
        let summary = RunSummary {
            files_found: 1200,
            files_hashed: 1198,
            files_skipped: 2,
            ..Default::default()
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("1198"));
    }
}
