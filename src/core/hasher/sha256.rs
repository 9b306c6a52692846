//! SHA-256 content hasher.

use super::{to_hex, ContentHasher};
use sha2::{Digest, Sha256};
use std::io::{self, ErrorKind, Read};

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Streams content through SHA-256
#[derive(Debug, Clone)]
pub struct Sha256Hasher {
    buffer_size: usize,
}

impl Sha256Hasher {
    /// Create a hasher with a 64 KiB read buffer
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Use a different read buffer size (minimum 1 byte)
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher for Sha256Hasher {
    fn checksum_reader(&self, reader: &mut dyn Read) -> io::Result<String> {
        let mut digest = Sha256::new();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => digest.update(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(to_hex(&digest.finalize()))
    }

    fn name(&self) -> &'static str {
        "sha256"
    }
}
