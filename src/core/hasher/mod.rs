//! # Hasher Module
//!
//! Computes content checksums for files.
//!
//! Files are streamed through the digest in fixed-size chunks, so memory use
//! does not depend on file size. The checksum is the lowercase hex encoding
//! of the digest.
//!
//! ## Example
//! ```rust,ignore
//! use dupfind::core::hasher::{ContentHasher, Sha256Hasher};
//!
//! let checksum = Sha256Hasher::new().checksum_file(&path)?;
//! assert_eq!(checksum.len(), 64);
//! ```

mod sha256;

pub use sha256::Sha256Hasher;

use crate::error::HashError;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Trait for checksum implementations
pub trait ContentHasher: Send + Sync {
    /// Digest everything `reader` yields and return the hex checksum
    fn checksum_reader(&self, reader: &mut dyn Read) -> io::Result<String>;

    /// Open `path` and checksum its content.
    ///
    /// The file handle is dropped before this returns, on success or error.
    fn checksum_file(&self, path: &Path) -> Result<String, HashError> {
        let mut file = File::open(path).map_err(|source| HashError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.checksum_reader(&mut file)
            .map_err(|source| HashError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Short algorithm name for logs
    fn name(&self) -> &'static str;
}

/// Lowercase hex encoding of a digest
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_hex_produces_lowercase_string() {
        assert_eq!(to_hex(&[0xDE, 0xAD, 0xBE, 0xEF]), "deadbeef");
        assert_eq!(to_hex(&[0x00, 0x0A]), "000a");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let hasher = Sha256Hasher::new();
        let result = hasher.checksum_file(Path::new("/nonexistent/file/12345"));

        assert!(matches!(result, Err(HashError::Open { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn directory_is_a_read_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let hasher = Sha256Hasher::new();

        let result = hasher.checksum_file(temp_dir.path());

        assert!(matches!(result, Err(HashError::Read { .. })));
    }
}
