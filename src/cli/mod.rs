//! # CLI Module
//!
//! Command-line interface for dupfind.
//!
//! ## Usage
//! ```bash
//! # Index a directory
//! dupfind build ~/Archive archive.json
//!
//! # Report files in ~/Downloads that are already archived
//! dupfind find ~/Downloads archive.json -j 8
//!
//! # Only print the names of the duplicates
//! dupfind find ~/Downloads archive.json --short
//! ```

use clap::{Args, Parser, Subcommand};
use console::style;
use dupfind::core::pipeline::{Pipeline, DEFAULT_WORKERS};
use dupfind::core::walker::TraversalErrorPolicy;
use dupfind::core::{DisplayMode, DuplicateFinder, Index, IndexWriter};
use dupfind::error::Result;
use dupfind::events::{
    null_sender, Event, EventChannel, EventSender, HashEvent, PipelineEvent, RunSummary,
    WalkEvent,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Build a checksum index of a directory and find duplicates against it
#[derive(Parser, Debug)]
#[command(name = "dupfind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build index
    Build {
        /// Directory to index
        path: PathBuf,

        /// Index file
        index: PathBuf,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Look up files in index
    Find {
        /// Directory of files to look up
        path: PathBuf,

        /// Index file
        index: PathBuf,

        /// For duplicate files, only print out the file name
        #[arg(long)]
        short: bool,

        #[command(flatten)]
        options: RunOptions,
    },
}

#[derive(Args, Debug)]
struct RunOptions {
    /// Number of parallel workers
    #[arg(short = 'j', long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_symlinks: bool,

    /// Skip unreadable directories instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Show a progress spinner on stderr
    #[arg(long)]
    progress: bool,
}

impl RunOptions {
    fn pipeline(&self, root: &Path) -> Result<Pipeline> {
        let policy = if self.skip_unreadable {
            TraversalErrorPolicy::Skip
        } else {
            TraversalErrorPolicy::Abort
        };

        Pipeline::builder()
            .root(root)
            .workers(self.workers)
            .follow_symlinks(self.follow_symlinks)
            .on_traversal_error(policy)
            .build()
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    dupfind::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            path,
            index,
            options,
        } => run_build(&path, &index, &options),
        Commands::Find {
            path,
            index,
            short,
            options,
        } => {
            let mode = if short {
                DisplayMode::Short
            } else {
                DisplayMode::Full
            };
            run_find(&path, &index, mode, &options)
        }
    }
}

fn run_build(root: &Path, index: &Path, options: &RunOptions) -> Result<()> {
    let pipeline = options.pipeline(root)?;

    let result = with_progress(options.progress, |events| {
        pipeline.run_with_events(IndexWriter::new(index), events)
    })?;

    log_summary(&result.summary);
    println!("Index file {} written.", result.output.display());
    Ok(())
}

fn run_find(root: &Path, index: &Path, mode: DisplayMode, options: &RunOptions) -> Result<()> {
    let pipeline = options.pipeline(root)?;
    let index = Index::load(index)?;
    info!("Loaded index with {} distinct checksums", index.len());

    let finder = DuplicateFinder::new(index, mode, io::stdout());
    let result = with_progress(options.progress, |events| {
        pipeline.run_with_events(finder, events)
    })?;

    log_summary(&result.summary);
    info!("{} duplicates found", result.output);
    Ok(())
}

fn log_summary(summary: &RunSummary) {
    info!(
        "Hashed {} of {} files in {:.1}s",
        summary.files_hashed,
        summary.files_found,
        summary.duration_ms as f64 / 1000.0
    );
    if summary.files_skipped > 0 {
        warn!("{} files could not be hashed", summary.files_skipped);
    }
    if summary.traversal_errors > 0 {
        warn!("{} unreadable entries were skipped", summary.traversal_errors);
    }
}

/// Run `job`, rendering pipeline events as a spinner when enabled
fn with_progress<T>(enabled: bool, job: impl FnOnce(&EventSender) -> Result<T>) -> Result<T> {
    if !enabled {
        return job(&null_sender());
    }

    let (sender, receiver) = EventChannel::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let event_thread = thread::spawn(move || {
        let mut found = 0usize;
        let mut hashed = 0usize;
        let mut skipped = 0usize;

        for event in receiver.iter() {
            match event {
                Event::Walk(WalkEvent::FileFound { .. }) => found += 1,
                Event::Hash(HashEvent::FileHashed { .. }) => hashed += 1,
                Event::Hash(HashEvent::Error { .. }) => skipped += 1,
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    spinner.finish_and_clear();
                    continue;
                }
                _ => continue,
            }

            spinner.set_message(format!(
                "{} hashed / {} found ({} skipped)",
                style(hashed).cyan(),
                found,
                style(skipped).yellow()
            ));
        }

        spinner.finish_and_clear();
    });

    let result = job(&sender);

    // Closes the channel once the pipeline's own clones are gone
    drop(sender);
    event_thread.join().ok();

    result
}
