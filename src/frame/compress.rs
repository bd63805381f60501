//! Container encoder.
//!
//! Input is cut into blocks of the configured size and each block is
//! compressed independently with one reused [`CompressContext`].  A block
//! that does not shrink is stored raw.

use std::io::{Read, Write};

use log::debug;

use crate::block::{compress_bound, compress_with_context, CompressContext};
use crate::frame::header::{read_full, FrameHeader};
use crate::frame::types::{
    FrameError, FrameOptions, FrameStats, BLOCK_HEADER_SIZE, HEADER_SIZE, RAW_BLOCK_FLAG,
};
use crate::xxhash::ContentHasher;

/// Upper bound on the container size for `content_size` input bytes.
pub fn frame_bound(content_size: usize, options: &FrameOptions) -> usize {
    let blocks = content_size.div_ceil(options.effective_block_size());
    // header + blocks + end mark + checksum
    HEADER_SIZE + blocks * BLOCK_HEADER_SIZE + content_size + 4 + 4
}

/// Compress `src` into a complete in-memory container.
pub fn compress_frame(src: &[u8], options: &FrameOptions) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::with_capacity(frame_bound(src.len(), options));
    let mut reader = src;
    write_frame(&mut reader, &mut out, options, Some(src.len() as u64))?;
    Ok(out)
}

/// Compress everything `reader` yields into one container on `writer`.
///
/// The content size is not known in advance, so the header leaves it unset.
pub fn compress_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    options: &FrameOptions,
) -> Result<FrameStats, FrameError> {
    write_frame(reader, writer, options, None)
}

fn write_frame<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    options: &FrameOptions,
    content_size: Option<u64>,
) -> Result<FrameStats, FrameError> {
    let header = FrameHeader {
        checksum: options.checksum,
        block_size_log: options.block_size_log(),
        content_size,
    };
    header.write_to(writer)?;

    let block_size = header.block_size();
    let mut input = vec![0u8; block_size];
    let mut packed = vec![0u8; compress_bound(block_size)];
    let mut ctx = CompressContext::new();
    let mut hasher = options.checksum.then(ContentHasher::new);
    let mut stats = FrameStats { frame_size: HEADER_SIZE as u64, ..FrameStats::default() };

    loop {
        let n = read_full(reader, &mut input)?;
        if n == 0 {
            break;
        }
        let block = &input[..n];
        if let Some(h) = hasher.as_mut() {
            h.update(block);
        }

        let packed_len = compress_with_context(&mut ctx, block, &mut packed)?;
        let (stored, payload) = if packed_len < n {
            (packed_len as u32, &packed[..packed_len])
        } else {
            (n as u32 | RAW_BLOCK_FLAG, block)
        };
        writer.write_all(&(n as u32).to_le_bytes())?;
        writer.write_all(&stored.to_le_bytes())?;
        writer.write_all(payload)?;
        debug!(
            "block {}: {} -> {} bytes{}",
            stats.blocks,
            n,
            payload.len(),
            if stored & RAW_BLOCK_FLAG != 0 { " (raw)" } else { "" }
        );

        stats.blocks += 1;
        stats.content_size += n as u64;
        stats.frame_size += (BLOCK_HEADER_SIZE + payload.len()) as u64;

        if n < block_size {
            break;
        }
    }

    writer.write_all(&0u32.to_le_bytes())?;
    stats.frame_size += 4;
    if let Some(h) = hasher {
        writer.write_all(&h.finish().to_le_bytes())?;
        stats.frame_size += 4;
    }
    writer.flush()?;

    if let Some(expected) = content_size {
        if expected != stats.content_size {
            return Err(FrameError::SizeMismatch { expected, actual: stats.content_size });
        }
    }
    Ok(stats)
}
