//! JSON index documents.
//!
//! A document is a pretty-printed array of `{"path": ..., "checksum": ...}`
//! objects.

use crate::core::record::FileRecord;
use crate::error::IndexError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// Read every record from an index document
pub fn read_records(path: &Path) -> Result<Vec<FileRecord>, IndexError> {
    let data = fs::read(path).map_err(|source| IndexError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&data).map_err(|source| IndexError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `records` to `path`, replacing any existing file.
///
/// The document goes to a temporary file in the same directory first and is
/// renamed over the destination, so readers never see a partial index.
pub fn write_records(path: &Path, records: &[FileRecord]) -> Result<(), IndexError> {
    let json = serde_json::to_vec_pretty(records).map_err(|source| IndexError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = temp_file_in(dir, path).map_err(|source| IndexError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(&json)
        .and_then(|_| file.flush())
        .map_err(|source| IndexError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    file.persist(path).map_err(|e| IndexError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Temporary file that will carry the mode `destination` ends up with:
/// the existing file's mode, or the usual `0o666` minus umask for a new one
#[cfg(unix)]
fn temp_file_in(dir: &Path, destination: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(destination) {
        Ok(existing) => existing.permissions(),
        Err(_) => fs::Permissions::from_mode(0o666),
    };
    Builder::new()
        .prefix(".dupfind-")
        .permissions(permissions)
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path, _destination: &Path) -> std::io::Result<NamedTempFile> {
    Builder::new().prefix(".dupfind-").tempfile_in(dir)
}
