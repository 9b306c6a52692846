//! # Walker Module
//!
//! Enumerates the files under a root directory.
//!
//! ## Behavior
//! - Every non-directory entry is emitted, in traversal order (unsorted)
//! - Symbolic links are not followed unless configured; a link whose target
//!   is not a directory is still emitted so its target gets hashed
//! - Traversal errors abort the walk unless the policy says to skip them
//!
//! ## Example
//! ```rust,ignore
//! use dupfind::core::walker::{PathWalker, WalkConfig};
//!
//! let walker = PathWalker::new(WalkConfig::default());
//! let files = walker.collect("/data".as_ref())?;
//! ```

mod traverse;

pub use traverse::PathWalker;

/// What to do when a directory entry cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalErrorPolicy {
    /// Stop the walk at the first error and report it to the caller
    #[default]
    Abort,
    /// Log the error and keep walking the rest of the tree
    Skip,
}

/// Configuration for the path walker
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Reaction to unreadable entries
    pub on_error: TraversalErrorPolicy,
}

/// Result of a completed walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Number of paths emitted
    pub files_found: usize,
    /// Traversal errors that were skipped
    pub traversal_errors: usize,
    /// False when the consumer stopped accepting paths before the walk ended
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_aborts() {
        assert_eq!(TraversalErrorPolicy::default(), TraversalErrorPolicy::Abort);
    }

    #[test]
    fn default_config_does_not_follow_links() {
        let config = WalkConfig::default();
        assert!(!config.follow_symlinks);
        assert!(config.max_depth.is_none());
    }
}
