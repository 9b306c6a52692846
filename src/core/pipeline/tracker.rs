//! Fan-in completion tracking.
//!
//! Every worker holds a clone of the record sender; the tracker holds the
//! original. The record stream closes when the last sender drops, and the
//! tracker only drops its own after joining every worker, so the stream can
//! neither close early nor stay open once the pool is done.

use super::worker::WorkerStats;
use crate::error::{DupfindError, Result};
use crossbeam_channel::Sender;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Aggregated outcome of the worker pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub totals: WorkerStats,
    pub workers_joined: usize,
    pub workers_panicked: usize,
}

/// Join barrier over the worker set that closes the output stream
pub struct CompletionTracker<T> {
    workers: Vec<JoinHandle<WorkerStats>>,
    output: Sender<T>,
}

impl<T: Send + 'static> CompletionTracker<T> {
    /// Track workers that send into `output`
    pub fn new(output: Sender<T>) -> Self {
        Self {
            workers: Vec::new(),
            output,
        }
    }

    pub fn register(&mut self, worker: JoinHandle<WorkerStats>) {
        self.workers.push(worker);
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Block until every worker has terminated, then release the sender.
    ///
    /// A worker that panicked counts as terminated.
    pub fn wait(self) -> PoolStats {
        let mut stats = PoolStats::default();

        for (id, worker) in self.workers.into_iter().enumerate() {
            match worker.join() {
                Ok(worker_stats) => stats.totals.merge(worker_stats),
                Err(_) => {
                    error!("Hashing worker {} panicked; remaining workers keep draining", id);
                    stats.workers_panicked += 1;
                }
            }
            stats.workers_joined += 1;
        }

        drop(self.output);
        debug!("All {} workers joined, record stream closed", stats.workers_joined);
        stats
    }

    /// Run [`wait`](Self::wait) on a dedicated thread
    pub fn spawn(self) -> Result<JoinHandle<PoolStats>> {
        thread::Builder::new()
            .name("dupfind-tracker".to_string())
            .spawn(move || self.wait())
            .map_err(|source| DupfindError::Spawn {
                name: "completion tracker".to_string(),
                source,
            })
    }
}
