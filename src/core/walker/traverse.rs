//! Directory walking implementation using walkdir.

use super::{TraversalErrorPolicy, WalkConfig, WalkSummary};
use crate::error::WalkError;
use crate::events::{null_sender, Event, EventSender, WalkEvent};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Walker over a single root, backed by the walkdir crate
pub struct PathWalker {
    config: WalkConfig,
}

impl PathWalker {
    /// Create a new walker with the given configuration
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Fail early when the root is missing or not a directory
    pub fn validate_root(&self, root: &Path) -> Result<(), WalkError> {
        if !root.exists() {
            return Err(WalkError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(WalkError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Walk `root` and hand every file path to `emit`.
    ///
    /// `emit` returns `false` once the consumer no longer accepts paths; the
    /// walk then stops early and reports `completed: false`.
    pub fn walk<F>(
        &self,
        root: &Path,
        mut emit: F,
        events: &EventSender,
    ) -> Result<WalkSummary, WalkError>
    where
        F: FnMut(PathBuf) -> bool,
    {
        self.validate_root(root)?;

        events.send(Event::Walk(WalkEvent::Started {
            root: root.to_path_buf(),
        }));

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut summary = WalkSummary::default();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    match self.config.on_error {
                        TraversalErrorPolicy::Abort => {
                            return Err(WalkError::Traversal { path, source: e });
                        }
                        TraversalErrorPolicy::Skip => {
                            warn!("Skipping unreadable entry {}: {}", path.display(), e);
                            events.send(Event::Walk(WalkEvent::Error {
                                path,
                                message: e.to_string(),
                            }));
                            summary.traversal_errors += 1;
                            continue;
                        }
                    }
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            // Unfollowed link: hash its target unless the target is a directory
            if entry.path_is_symlink() && !self.config.follow_symlinks && entry.path().is_dir() {
                debug!("Not descending into directory link {}", entry.path().display());
                continue;
            }

            let path = entry.into_path();
            events.send(Event::Walk(WalkEvent::FileFound { path: path.clone() }));
            summary.files_found += 1;

            if !emit(path) {
                debug!("Path consumer went away, stopping walk of {}", root.display());
                return Ok(summary);
            }
        }

        summary.completed = true;
        events.send(Event::Walk(WalkEvent::Completed {
            files_found: summary.files_found,
        }));

        Ok(summary)
    }

    /// Collect every file path under `root`
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>, WalkError> {
        let mut paths = Vec::new();
        self.walk(
            root,
            |path| {
                paths.push(path);
                true
            },
            &null_sender(),
        )?;
        Ok(paths)
    }
}
