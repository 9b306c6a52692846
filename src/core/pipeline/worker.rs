//! Hashing workers.

use crate::core::hasher::ContentHasher;
use crate::core::record::FileRecord;
use crate::events::{Event, EventSender, HashEvent};
use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a single worker did before it exited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub hashed: usize,
    pub skipped: usize,
}

impl WorkerStats {
    pub fn merge(&mut self, other: WorkerStats) {
        self.hashed += other.hashed;
        self.skipped += other.skipped;
    }
}

/// Drain `paths` until it closes, sending one record per hashed file.
///
/// Files that cannot be opened or read are logged and skipped. The worker
/// also stops when `records` has no receiver left.
pub(crate) fn run_worker(
    id: usize,
    paths: Receiver<PathBuf>,
    records: Sender<FileRecord>,
    hasher: Arc<dyn ContentHasher>,
    events: EventSender,
) -> WorkerStats {
    let mut stats = WorkerStats::default();
    debug!("Hashing worker {} started ({})", id, hasher.name());

    for path in paths.iter() {
        match hasher.checksum_file(&path) {
            Ok(checksum) => {
                events.send(Event::Hash(HashEvent::FileHashed {
                    worker: id,
                    path: path.clone(),
                }));

                if records.send(FileRecord::new(path, checksum)).is_err() {
                    debug!("Record stream closed, hashing worker {} stopping", id);
                    break;
                }
                stats.hashed += 1;
            }
            Err(e) => {
                warn!("Could not compute checksum for file {}: {}", e.path().display(), e);
                events.send(Event::Hash(HashEvent::Error {
                    worker: id,
                    path,
                    message: e.to_string(),
                }));
                stats.skipped += 1;
            }
        }
    }

    events.send(Event::Hash(HashEvent::WorkerFinished { worker: id }));
    debug!(
        "Hashing worker {} finished: {} hashed, {} skipped",
        id, stats.hashed, stats.skipped
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::Sha256Hasher;
    use crate::events::null_sender;
    use crossbeam_channel::unbounded;
    use tempfile::TempDir;

    #[test]
    fn worker_hashes_every_path_and_skips_failures() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        std::fs::write(&good, "hello").unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let (path_tx, path_rx) = unbounded();
        let (record_tx, record_rx) = unbounded();
        path_tx.send(missing).unwrap();
        path_tx.send(good.clone()).unwrap();
        drop(path_tx);

        let hasher = Arc::new(Sha256Hasher::new());
        let stats = run_worker(0, path_rx, record_tx, hasher, null_sender());

        assert_eq!(stats, WorkerStats { hashed: 1, skipped: 1 });
        let records: Vec<_> = record_rx.iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, good);
    }

    #[test]
    fn worker_stops_when_record_receiver_is_gone() {
        let temp_dir = TempDir::new().unwrap();
        let (path_tx, path_rx) = unbounded();
        for i in 0..3 {
            let path = temp_dir.path().join(format!("{i}.txt"));
            std::fs::write(&path, "x").unwrap();
            path_tx.send(path).unwrap();
        }
        drop(path_tx);

        let (record_tx, record_rx) = unbounded::<FileRecord>();
        drop(record_rx);

        let hasher = Arc::new(Sha256Hasher::new());
        let stats = run_worker(0, path_rx.clone(), record_tx, hasher, null_sender());

        assert_eq!(stats.hashed, 0);
        // Only the first path was taken off the queue
        assert_eq!(path_rx.len(), 2);
    }

    #[test]
    fn stats_merge_adds_counts() {
        let mut total = WorkerStats { hashed: 2, skipped: 1 };
        total.merge(WorkerStats { hashed: 3, skipped: 0 });
        assert_eq!(total, WorkerStats { hashed: 5, skipped: 1 });
    }
}
