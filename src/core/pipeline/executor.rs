//! Pipeline execution implementation.

use super::tracker::{CompletionTracker, PoolStats};
use super::worker::run_worker;
use crate::core::hasher::{ContentHasher, Sha256Hasher};
use crate::core::record::FileRecord;
use crate::core::sink::RecordSink;
use crate::core::walker::{PathWalker, TraversalErrorPolicy, WalkConfig, WalkSummary};
use crate::error::{DupfindError, Result, WalkError};
use crate::events::{null_sender, Event, EventSender, PipelineEvent, RunSummary};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, info};

/// Default number of hashing workers
pub const DEFAULT_WORKERS: usize = 4;

/// Capacity of the path and record queues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueCapacity {
    /// Zero-capacity hand-off: every send waits for a matching receive
    #[default]
    Rendezvous,
    /// Buffer up to `n` items before the sender blocks
    Bounded(usize),
    /// Never block the sender
    Unbounded,
}

impl QueueCapacity {
    fn channel<T>(self) -> (Sender<T>, Receiver<T>) {
        match self {
            QueueCapacity::Rendezvous => bounded(0),
            QueueCapacity::Bounded(n) => bounded(n),
            QueueCapacity::Unbounded => unbounded(),
        }
    }
}

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult<T> {
    /// What the sink produced
    pub output: T,
    /// Counters for the run
    pub summary: RunSummary,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory to walk
    pub root: PathBuf,
    /// Number of hashing workers (at least 1)
    pub workers: usize,
    /// Walker configuration
    pub walk: WalkConfig,
    /// Capacity of the path and record queues
    pub queue: QueueCapacity,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            workers: DEFAULT_WORKERS,
            walk: WalkConfig::default(),
            queue: QueueCapacity::default(),
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    hasher: Option<Arc<dyn ContentHasher>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            hasher: None,
        }
    }

    /// Set the directory to walk
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Set the number of hashing workers
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set walker configuration
    pub fn walk_config(mut self, config: WalkConfig) -> Self {
        self.config.walk = config;
        self
    }

    /// Follow symbolic links while walking
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.walk.follow_symlinks = follow;
        self
    }

    /// Choose how traversal errors are handled
    pub fn on_traversal_error(mut self, policy: TraversalErrorPolicy) -> Self {
        self.config.walk.on_error = policy;
        self
    }

    /// Set the path and record queue capacity
    pub fn queue_capacity(mut self, capacity: QueueCapacity) -> Self {
        self.config.queue = capacity;
        self
    }

    /// Replace the SHA-256 hasher
    pub fn hasher(mut self, hasher: Arc<dyn ContentHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Validate the configuration and build the pipeline
    pub fn build(self) -> Result<Pipeline> {
        if self.config.workers == 0 {
            return Err(DupfindError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }

        Ok(Pipeline {
            config: self.config,
            hasher: self
                .hasher
                .unwrap_or_else(|| Arc::new(Sha256Hasher::new())),
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk, hash and fan records into one stream
pub struct Pipeline {
    config: PipelineConfig,
    hasher: Arc<dyn ContentHasher>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline into `sink` without events
    pub fn run<S: RecordSink>(&self, sink: S) -> Result<PipelineResult<S::Output>> {
        self.run_with_events(sink, &null_sender())
    }

    /// Run the pipeline into `sink` with event reporting.
    ///
    /// The sink's `finish` only runs if the walk succeeded, so a build never
    /// writes an index for a partially walked tree.
    pub fn run_with_events<S: RecordSink>(
        &self,
        mut sink: S,
        events: &EventSender,
    ) -> Result<PipelineResult<S::Output>> {
        let mut stream = self.spawn(events)?;

        let consumed = stream.by_ref().try_for_each(|record| sink.accept(record));
        let finished = stream.finish();
        consumed?;
        let summary = finished?;

        let output = sink.finish()?;
        Ok(PipelineResult { output, summary })
    }

    /// Start the walker, the workers and the tracker.
    ///
    /// The returned stream yields records until every worker has finished.
    /// Call [`RecordStream::finish`] afterwards to collect the outcome.
    pub fn spawn(&self, events: &EventSender) -> Result<RecordStream> {
        let walker = PathWalker::new(self.config.walk.clone());
        walker.validate_root(&self.config.root)?;

        let started = Instant::now();
        events.send(Event::Pipeline(PipelineEvent::Started {
            workers: self.config.workers,
        }));
        info!(
            "Hashing files under {} with {} workers",
            self.config.root.display(),
            self.config.workers
        );

        let (path_tx, path_rx) = self.config.queue.channel::<PathBuf>();
        let (record_tx, record_rx) = self.config.queue.channel::<FileRecord>();

        let root = self.config.root.clone();
        let walker_events = events.clone();
        let walker_handle = thread::Builder::new()
            .name("dupfind-walker".to_string())
            .spawn(move || {
                walker.walk(&root, |path| path_tx.send(path).is_ok(), &walker_events)
            })
            .map_err(|source| DupfindError::Spawn {
                name: "walker".to_string(),
                source,
            })?;

        let mut tracker = CompletionTracker::new(record_tx.clone());
        for id in 0..self.config.workers {
            let paths = path_rx.clone();
            let records = record_tx.clone();
            let hasher = Arc::clone(&self.hasher);
            let worker_events = events.clone();

            let handle = thread::Builder::new()
                .name(format!("dupfind-hash-{id}"))
                .spawn(move || run_worker(id, paths, records, hasher, worker_events))
                .map_err(|source| DupfindError::Spawn {
                    name: format!("hashing worker {id}"),
                    source,
                })?;
            tracker.register(handle);
        }
        // Only workers and the tracker may keep the queues open
        drop(path_rx);
        drop(record_tx);

        let tracker_handle = tracker.spawn()?;

        Ok(RecordStream {
            records: Some(record_rx),
            walker: walker_handle,
            tracker: tracker_handle,
            events: events.clone(),
            started,
        })
    }
}

/// Records produced by a running pipeline, in completion order
pub struct RecordStream {
    records: Option<Receiver<FileRecord>>,
    walker: JoinHandle<std::result::Result<WalkSummary, WalkError>>,
    tracker: JoinHandle<PoolStats>,
    events: EventSender,
    started: Instant,
}

impl Iterator for RecordStream {
    type Item = FileRecord;

    fn next(&mut self) -> Option<FileRecord> {
        self.records.as_ref()?.recv().ok()
    }
}

impl RecordStream {
    /// Stop consuming, wait for every pipeline thread and summarize the run.
    ///
    /// Remaining records are discarded. Fails if the walk aborted or the
    /// worker pool died before every path was handed off.
    pub fn finish(mut self) -> Result<RunSummary> {
        // Unblocks workers still trying to hand off records
        self.records.take();

        let pool = self
            .tracker
            .join()
            .map_err(|_| DupfindError::ThreadPanicked("completion tracker"))?;
        let walk = self
            .walker
            .join()
            .map_err(|_| DupfindError::ThreadPanicked("walker"))?;

        let walk = match walk {
            Ok(walk) => walk,
            Err(e) => {
                error!("Walk aborted: {}", e);
                return Err(e.into());
            }
        };

        // Panics that stopped the walk, or left no worker alive, lose paths
        let exhausted = pool.workers_panicked == pool.workers_joined;
        if pool.workers_panicked > 0 && (!walk.completed || exhausted) {
            error!(
                "Walk stopped early: {} of {} workers panicked",
                pool.workers_panicked, pool.workers_joined
            );
            return Err(DupfindError::WorkersExhausted {
                panicked: pool.workers_panicked,
            });
        }

        let summary = RunSummary {
            files_found: walk.files_found,
            files_hashed: pool.totals.hashed,
            files_skipped: pool.totals.skipped,
            traversal_errors: walk.traversal_errors,
            workers_panicked: pool.workers_panicked,
            duration_ms: self.started.elapsed().as_millis() as u64,
        };

        debug!("Pipeline finished: {:?}", summary);
        self.events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(summary)
    }
}
