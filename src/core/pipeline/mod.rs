//! # Pipeline Module
//!
//! Walks a tree, hashes every file and fans the records into one stream.
//!
//! ## Threads
//! ```text
//! walker ──paths──▶ worker 0..N ──records──▶ sink (caller's thread)
//!                        │
//!                   tracker (joins workers, then closes the record stream)
//! ```
//!
//! Both queues are crossbeam channels. By default they are zero-capacity, so
//! the walker and each worker hand items off one at a time.

mod executor;
mod tracker;
mod worker;

pub use executor::{
    Pipeline, PipelineBuilder, PipelineConfig, PipelineResult, QueueCapacity, RecordStream,
    DEFAULT_WORKERS,
};
pub use tracker::{CompletionTracker, PoolStats};
pub use worker::WorkerStats;
