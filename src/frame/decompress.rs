//! Container decoder.

use std::io::{self, Read, Write};

use log::debug;

use crate::block::{compress_bound, decompress_unknown_size};
use crate::frame::header::{read_exact_or_truncated, read_u32_le, FrameHeader};
use crate::frame::types::{FrameError, FrameStats, BLOCK_HEADER_SIZE, HEADER_SIZE, RAW_BLOCK_FLAG};
use crate::xxhash::ContentHasher;

/// Decompress one in-memory container.  Bytes after the container are
/// ignored.
pub fn decompress_frame(src: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut reader = src;
    let mut out = Vec::new();
    decompress_stream(&mut reader, &mut out)?;
    Ok(out)
}

/// Decode one container from `reader`, writing the content to `writer`.
pub fn decompress_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<FrameStats, FrameError> {
    let header = FrameHeader::read_from(reader)?;
    debug!("container header: {header:?}");

    let block_size = header.block_size();
    let mut packed: Vec<u8> = Vec::new();
    let mut out: Vec<u8> = Vec::new();
    let mut hasher = header.checksum.then(ContentHasher::new);
    let mut stats = FrameStats { frame_size: HEADER_SIZE as u64, ..FrameStats::default() };

    loop {
        let decoded_len = read_u32_le(reader)? as usize;
        stats.frame_size += 4;
        if decoded_len == 0 {
            break;
        }
        if decoded_len > block_size {
            return Err(FrameError::BlockTooLarge { len: decoded_len, max: block_size });
        }

        let stored = read_u32_le(reader)?;
        let raw = stored & RAW_BLOCK_FLAG != 0;
        let stored_len = (stored & !RAW_BLOCK_FLAG) as usize;
        out.resize(decoded_len, 0);

        if raw {
            if stored_len != decoded_len {
                return Err(FrameError::SizeMismatch {
                    expected: decoded_len as u64,
                    actual: stored_len as u64,
                });
            }
            read_exact_or_truncated(reader, &mut out)?;
        } else {
            let max = compress_bound(decoded_len);
            if stored_len > max {
                return Err(FrameError::BlockTooLarge { len: stored_len, max });
            }
            packed.resize(stored_len, 0);
            read_exact_or_truncated(reader, &mut packed)?;
            let produced = decompress_unknown_size(&packed, &mut out)?;
            if produced != decoded_len {
                return Err(FrameError::SizeMismatch {
                    expected: decoded_len as u64,
                    actual: produced as u64,
                });
            }
        }

        if let Some(h) = hasher.as_mut() {
            h.update(&out);
        }
        writer.write_all(&out)?;
        debug!(
            "block {}: {} -> {} bytes{}",
            stats.blocks,
            stored_len,
            decoded_len,
            if raw { " (raw)" } else { "" }
        );

        stats.blocks += 1;
        stats.content_size += decoded_len as u64;
        stats.frame_size += (BLOCK_HEADER_SIZE - 4 + stored_len) as u64;
    }

    if let Some(h) = hasher {
        let expected = read_u32_le(reader)?;
        stats.frame_size += 4;
        let actual = h.finish();
        if expected != actual {
            return Err(FrameError::ChecksumMismatch { expected, actual });
        }
    }

    if let Some(expected) = header.content_size {
        if expected != stats.content_size {
            return Err(FrameError::SizeMismatch { expected, actual: stats.content_size });
        }
    }

    writer.flush()?;
    Ok(stats)
}

/// Decode a container and discard the content, checking its integrity.
pub fn verify_stream<R: Read>(reader: &mut R) -> Result<FrameStats, FrameError> {
    decompress_stream(reader, &mut io::sink())
}
