//! Buffer configuration (allocation, streaming and compaction policy).

use crate::error::{BitBufferError, Result};

/// Configuration for a [`BitBuffer`](crate::BitBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitBufferConfig {
    /// Bytes reserved up front. Zero means nothing is allocated until the
    /// first write.
    pub initial_capacity: usize,
    /// Bytes pulled per read call when filling from a byte source.
    pub read_chunk_size: usize,
    /// Whether `recalibrate` drains storage that precedes the begin cursor.
    pub compact_on_recalibrate: bool,
}

impl BitBufferConfig {
    /// Default configuration.
    ///
    /// - No initial allocation
    /// - 4 KB read chunks
    /// - Storage compacted on recalibrate
    pub const DEFAULT: Self = Self {
        initial_capacity: 0,
        read_chunk_size: 4096,
        compact_on_recalibrate: true,
    };

    /// Keeps every storage byte until `reset`.
    ///
    /// Recalibrate still moves the rewind boundary, it just never shrinks
    /// the backing storage.
    pub const UNCOMPACTED: Self = Self {
        initial_capacity: 0,
        read_chunk_size: 4096,
        compact_on_recalibrate: false,
    };

    /// Set the number of bytes reserved up front.
    pub fn with_initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    /// Set the read chunk size used by `read_from`.
    pub fn with_read_chunk_size(mut self, bytes: usize) -> Self {
        self.read_chunk_size = bytes;
        self
    }

    /// Enable or disable compaction on recalibrate.
    pub fn with_compaction(mut self, compact: bool) -> Self {
        self.compact_on_recalibrate = compact;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.read_chunk_size == 0 {
            return Err(BitBufferError::invalid_argument(
                "read_chunk_size must be at least 1 byte",
            ));
        }
        Ok(())
    }
}

impl Default for BitBufferConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
