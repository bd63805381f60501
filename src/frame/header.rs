//! Container header encoding and parsing, plus the small read helpers the
//! decoder shares.

use std::io::{self, Read, Write};

use crate::frame::types::{
    FrameError, BLOCK_SIZE_LOG_MAX, BLOCK_SIZE_LOG_MIN, FLAG_CONTENT_CHECKSUM, FLAG_CONTENT_SIZE,
    HEADER_SIZE, KNOWN_FLAGS, MAGIC,
};

/// Decoded container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// A content checksum follows the end mark.
    pub checksum: bool,
    /// Log₂ of the maximum decompressed block size.
    pub block_size_log: u8,
    /// Total decompressed size, when the writer knew it up front.
    pub content_size: Option<u64>,
}

impl FrameHeader {
    /// Maximum decompressed size of one block.
    pub fn block_size(&self) -> usize {
        1usize << self.block_size_log
    }

    /// Serialise to the fixed 16-byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut flags = 0u8;
        if self.checksum {
            flags |= FLAG_CONTENT_CHECKSUM;
        }
        if self.content_size.is_some() {
            flags |= FLAG_CONTENT_SIZE;
        }

        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        out[4] = flags;
        out[6] = self.block_size_log;
        out[8..16].copy_from_slice(&self.content_size.unwrap_or(0).to_le_bytes());
        out
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), FrameError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Parse and validate a header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::Truncated);
        }
        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != MAGIC {
            return Err(FrameError::BadMagic(magic));
        }

        let flags = bytes[4];
        if flags & !KNOWN_FLAGS != 0 || bytes[5] != 0 || bytes[7] != 0 {
            return Err(FrameError::UnsupportedFlags(flags));
        }

        let block_size_log = bytes[6];
        if !(BLOCK_SIZE_LOG_MIN..=BLOCK_SIZE_LOG_MAX).contains(&block_size_log) {
            return Err(FrameError::BadBlockSize(block_size_log));
        }

        let mut size = [0u8; 8];
        size.copy_from_slice(&bytes[8..16]);
        let content_size =
            (flags & FLAG_CONTENT_SIZE != 0).then_some(u64::from_le_bytes(size));

        Ok(Self {
            checksum: flags & FLAG_CONTENT_CHECKSUM != 0,
            block_size_log,
            content_size,
        })
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, FrameError> {
        let mut buf = [0u8; HEADER_SIZE];
        read_exact_or_truncated(reader, &mut buf)?;
        Self::parse(&buf)
    }
}

/// `read_exact`, with end-of-stream reported as [`FrameError::Truncated`].
pub(crate) fn read_exact_or_truncated<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<(), FrameError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => FrameError::Truncated,
        _ => FrameError::Io(e),
    })
}

pub(crate) fn read_u32_le<R: Read>(reader: &mut R) -> Result<u32, FrameError> {
    let mut buf = [0u8; 4];
    read_exact_or_truncated(reader, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Fill `buf` as far as the reader allows; returns the byte count, which is
/// short only at end of stream.
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
