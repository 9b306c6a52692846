//! Duplicate lookup against a loaded index.

use super::RecordSink;
use crate::core::index::Index;
use crate::core::record::FileRecord;
use crate::error::{DupfindError, Result};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// How duplicates are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// `File <new> is duplicate with index file <indexed>`
    #[default]
    Full,
    /// Base filename of the new file only
    Short,
}

/// A scanned file whose content is already in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    /// The newly hashed file
    pub path: PathBuf,
    /// The path the index recorded for the same checksum
    pub original: PathBuf,
}

impl Duplicate {
    pub fn display(&self, mode: DisplayMode) -> DuplicateLine<'_> {
        DuplicateLine {
            duplicate: self,
            mode,
        }
    }
}

/// One report line for a duplicate
pub struct DuplicateLine<'a> {
    duplicate: &'a Duplicate,
    mode: DisplayMode,
}

impl fmt::Display for DuplicateLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            DisplayMode::Full => write!(
                f,
                "File {} is duplicate with index file {}",
                self.duplicate.path.display(),
                self.duplicate.original.display()
            ),
            DisplayMode::Short => match self.duplicate.path.file_name() {
                Some(name) => write!(f, "{}", name.to_string_lossy()),
                None => write!(f, "{}", self.duplicate.path.display()),
            },
        }
    }
}

/// Reports every incoming record whose checksum is in the index.
///
/// Records without a match are dropped silently.
pub struct DuplicateFinder<W: Write> {
    index: Index,
    mode: DisplayMode,
    out: W,
    reported: usize,
}

impl<W: Write> DuplicateFinder<W> {
    pub fn new(index: Index, mode: DisplayMode, out: W) -> Self {
        Self {
            index,
            mode,
            out,
            reported: 0,
        }
    }
}

impl<W: Write> RecordSink for DuplicateFinder<W> {
    /// Number of duplicates reported
    type Output = usize;

    fn accept(&mut self, record: FileRecord) -> Result<()> {
        let Some(original) = self.index.lookup(&record.checksum) else {
            return Ok(());
        };

        let duplicate = Duplicate {
            path: record.path,
            original: original.to_path_buf(),
        };
        writeln!(self.out, "{}", duplicate.display(self.mode)).map_err(DupfindError::Report)?;
        self.reported += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        self.out.flush().map_err(DupfindError::Report)?;
        Ok(self.reported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Index {
        Index::from_records(vec![
            FileRecord::new("src/a.txt", "hello-sum"),
            FileRecord::new("src/c.txt", "world-sum"),
        ])
    }

    #[test]
    fn full_mode_names_both_files() {
        let mut out = Vec::new();
        let mut finder = DuplicateFinder::new(index(), DisplayMode::Full, &mut out);

        finder.accept(FileRecord::new("scan/d.txt", "hello-sum")).unwrap();
        let reported = finder.finish().unwrap();

        assert_eq!(reported, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "File scan/d.txt is duplicate with index file src/a.txt\n"
        );
    }

    #[test]
    fn short_mode_prints_base_filename() {
        let mut out = Vec::new();
        let mut finder = DuplicateFinder::new(index(), DisplayMode::Short, &mut out);

        finder.accept(FileRecord::new("scan/deep/d.txt", "world-sum")).unwrap();
        finder.finish().unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "d.txt\n");
    }

    #[test]
    fn unknown_checksum_is_silent() {
        let mut out = Vec::new();
        let mut finder = DuplicateFinder::new(index(), DisplayMode::Full, &mut out);

        finder.accept(FileRecord::new("scan/e.txt", "other-sum")).unwrap();
        let reported = finder.finish().unwrap();

        assert_eq!(reported, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn count_covers_every_match() {
        let mut out = Vec::new();
        let mut finder = DuplicateFinder::new(index(), DisplayMode::Short, &mut out);

        finder.accept(FileRecord::new("scan/1.txt", "hello-sum")).unwrap();
        finder.accept(FileRecord::new("scan/2.txt", "other-sum")).unwrap();
        finder.accept(FileRecord::new("scan/3.txt", "world-sum")).unwrap();
        finder.accept(FileRecord::new("scan/4.txt", "hello-sum")).unwrap();

        assert_eq!(finder.finish().unwrap(), 3);
        assert_eq!(String::from_utf8(out).unwrap(), "1.txt\n3.txt\n4.txt\n");
    }

    #[test]
    fn broken_output_is_an_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut finder = DuplicateFinder::new(index(), DisplayMode::Full, Closed);
        let result = finder.accept(FileRecord::new("scan/d.txt", "hello-sum"));

        assert!(matches!(result, Err(DupfindError::Report(_))));
    }
}
