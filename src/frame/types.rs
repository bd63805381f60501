//! Container format constants, options, and errors.
//!
//! Layout of a container:
//!
//! ```text
//! header   16 bytes   magic u32 LE | flags u8 | 0 | block-size log2 u8 | 0 | content size u64 LE
//! block*              decompressed len u32 LE | stored len u32 LE | payload
//! end mark  4 bytes   decompressed len == 0
//! footer    4 bytes   xxh32 (seed 0) of the content, only with FLAG_CONTENT_CHECKSUM
//! ```

use thiserror::Error;

use crate::block::{CompressError, DecompressError};
use crate::config::{BLOCK_SIZE_DEFAULT, BLOCK_SIZE_MAX, BLOCK_SIZE_MIN, CHECKSUM_DEFAULT};

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// "LZL1" read as a little-endian `u32`.
pub const MAGIC: u32 = 0x314C_5A4C;

/// Fixed header length.
pub const HEADER_SIZE: usize = 16;

/// Per-block header: decompressed length + stored length.
pub const BLOCK_HEADER_SIZE: usize = 8;

/// Flag bit: a content checksum follows the end mark.
pub const FLAG_CONTENT_CHECKSUM: u8 = 0x01;

/// Flag bit: the header's content-size field is meaningful.
pub const FLAG_CONTENT_SIZE: u8 = 0x02;

/// All flag bits this version understands.
pub const KNOWN_FLAGS: u8 = FLAG_CONTENT_CHECKSUM | FLAG_CONTENT_SIZE;

/// High bit of the stored length: the payload is the raw block.
pub const RAW_BLOCK_FLAG: u32 = 0x8000_0000;

pub const BLOCK_SIZE_LOG_MIN: u8 = BLOCK_SIZE_MIN.trailing_zeros() as u8;
pub const BLOCK_SIZE_LOG_MAX: u8 = BLOCK_SIZE_MAX.trailing_zeros() as u8;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Encoder settings for one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    /// Requested maximum block size in bytes.  Rounded up to a power of two
    /// and clamped to `BLOCK_SIZE_MIN..=BLOCK_SIZE_MAX`.
    pub block_size: usize,
    /// Append an xxh32 content checksum.
    pub checksum: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self { block_size: BLOCK_SIZE_DEFAULT, checksum: CHECKSUM_DEFAULT }
    }
}

impl FrameOptions {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    /// Log₂ of the effective block size, as stored in the header.
    pub fn block_size_log(&self) -> u8 {
        let size = self.block_size.clamp(BLOCK_SIZE_MIN, BLOCK_SIZE_MAX).next_power_of_two();
        size.trailing_zeros() as u8
    }

    /// Effective block size in bytes.
    pub fn effective_block_size(&self) -> usize {
        1usize << self.block_size_log()
    }
}

/// Byte counts reported after a container has been written or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Decompressed bytes.
    pub content_size: u64,
    /// Container bytes, header and footer included.
    pub frame_size: u64,
    pub blocks: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from reading or writing a container.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an lz4lite container (magic {0:#010x})")]
    BadMagic(u32),

    #[error("unsupported header flags {0:#04x}")]
    UnsupportedFlags(u8),

    #[error("unsupported block size log {0}")]
    BadBlockSize(u8),

    #[error("container ended unexpectedly")]
    Truncated,

    #[error("block of {len} bytes exceeds the limit of {max} bytes")]
    BlockTooLarge { len: usize, max: usize },

    #[error("size mismatch: expected {expected} bytes, found {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("content checksum mismatch: stored {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("block compression failed: {0}")]
    Compress(#[from] CompressError),

    #[error("block decompression failed: {0}")]
    Decompress(#[from] DecompressError),
}
