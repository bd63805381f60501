//! Public block decompression API.
//!
//!   - [`decompress`]: destination length is the exact original size;
//!     returns source bytes consumed.
//!   - [`decompress_unknown_size`]: destination length is an upper bound;
//!     returns bytes produced.
//!   - [`decompress_to_vec`] / [`decompress_to_vec_bounded`]: allocating
//!     wrappers around the two above.
//!
//! All entry points are safe functions over slices.  Corrupt input yields a
//! [`DecompressError`]; see the `decompress_core` module for the checks.

use log::debug;

use super::decompress_core::{decompress_generic, DecodeMode, DecompressError};

/// Decompress a block whose decompressed size is exactly `dst.len()`.
///
/// Returns the number of bytes of `src` that were read.  A well-formed
/// block produced by this crate is consumed completely.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    decompress_generic(src, dst, DecodeMode::ExactOutput).inspect_err(|e| {
        debug!("block decompress failed: {e} (src {} bytes, dst {} bytes)", src.len(), dst.len())
    })
}

/// Decompress a block into a buffer of at most `dst.len()` bytes.
///
/// The whole of `src` is treated as one block.  Returns the number of bytes
/// written to the front of `dst`.
pub fn decompress_unknown_size(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    decompress_generic(src, dst, DecodeMode::BoundedOutput).inspect_err(|e| {
        debug!(
            "block decompress (unknown size) failed: {e} (src {} bytes, capacity {} bytes)",
            src.len(),
            dst.len()
        )
    })
}

/// Decompress into a freshly allocated buffer of exactly `decompressed_len`
/// bytes.
pub fn decompress_to_vec(src: &[u8], decompressed_len: usize) -> Result<Vec<u8>, DecompressError> {
    let mut out = vec![0u8; decompressed_len];
    decompress(src, &mut out)?;
    Ok(out)
}

/// Decompress into a freshly allocated buffer of at most `max_len` bytes,
/// truncated to the produced length.
pub fn decompress_to_vec_bounded(src: &[u8], max_len: usize) -> Result<Vec<u8>, DecompressError> {
    let mut out = vec![0u8; max_len];
    let n = decompress_unknown_size(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}
