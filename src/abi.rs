//! C-ABI shims with the signed-sentinel return contract.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `target/release/liblz4lite.a` exports four symbols:
//! `lz4lite_compress`, `lz4lite_decompress`,
//! `lz4lite_decompress_unknown_size` and `lz4lite_compress_bound`.

use std::os::raw::{c_char, c_int};
use std::slice;

use crate::block::compress::{compress, compress_bound, CompressError};
use crate::block::decompress_api::{decompress, decompress_unknown_size};
use crate::block::decompress_core::DecompressError;
use crate::block::types::MAX_INPUT_SIZE;

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Reject null pointers and negative sizes before building slices.
#[inline(always)]
fn check_args(
    src: *const c_char,
    dst: *mut c_char,
    src_size: c_int,
    dst_size: c_int,
) -> Result<(usize, usize), &'static str> {
    if src.is_null() || dst.is_null() {
        return Err("null buffer pointer");
    }
    if src_size < 0 || dst_size < 0 {
        return Err("negative buffer size");
    }
    Ok((src_size as usize, dst_size as usize))
}

/// Map a decoder result to the signed sentinel.
#[inline(always)]
fn decode_status(result: Result<usize, DecompressError>) -> c_int {
    match result {
        Ok(n) => n as c_int,
        Err(e) => e.status().clamp(c_int::MIN as i64, -1) as c_int,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// int lz4lite_compress(const char *src, char *dst, int srcSize, int dstCapacity);
//
// Returns number of bytes written to dst, or 0 on failure.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lz4lite_compress(
    src: *const c_char,
    dst: *mut c_char,
    src_size: c_int,
    dst_capacity: c_int,
) -> c_int {
    let (src_len, dst_len) = match check_args(src, dst, src_size, dst_capacity) {
        Ok(lens) => lens,
        Err(msg) => {
            log::debug!("lz4lite_compress: {}", CompressError::InvalidArgument(msg));
            return 0;
        }
    };
    let src_slice = slice::from_raw_parts(src as *const u8, src_len);
    let dst_slice = slice::from_raw_parts_mut(dst as *mut u8, dst_len);
    match compress(src_slice, dst_slice) {
        Ok(n) => n as c_int,
        Err(_) => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// int lz4lite_decompress(const char *src, char *dst, int srcSize, int dstSize);
//
// dstSize is the exact decompressed size.  Returns bytes of src consumed, or
// a negative value whose magnitude approximates the failing input offset.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lz4lite_decompress(
    src: *const c_char,
    dst: *mut c_char,
    src_size: c_int,
    dst_size: c_int,
) -> c_int {
    let (src_len, dst_len) = match check_args(src, dst, src_size, dst_size) {
        Ok(lens) => lens,
        Err(msg) => return decode_status(Err(DecompressError::InvalidArgument(msg))),
    };
    let src_slice = slice::from_raw_parts(src as *const u8, src_len);
    let dst_slice = slice::from_raw_parts_mut(dst as *mut u8, dst_len);
    decode_status(decompress(src_slice, dst_slice))
}

// ─────────────────────────────────────────────────────────────────────────────
// int lz4lite_decompress_unknown_size(const char *src, char *dst,
//                                     int srcSize, int maxDstSize);
//
// Returns bytes written to dst, or a negative value on error.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lz4lite_decompress_unknown_size(
    src: *const c_char,
    dst: *mut c_char,
    src_size: c_int,
    max_dst_size: c_int,
) -> c_int {
    let (src_len, dst_len) = match check_args(src, dst, src_size, max_dst_size) {
        Ok(lens) => lens,
        Err(msg) => return decode_status(Err(DecompressError::InvalidArgument(msg))),
    };
    let src_slice = slice::from_raw_parts(src as *const u8, src_len);
    let dst_slice = slice::from_raw_parts_mut(dst as *mut u8, dst_len);
    decode_status(decompress_unknown_size(src_slice, dst_slice))
}

// ─────────────────────────────────────────────────────────────────────────────
// int lz4lite_compress_bound(int srcSize);
//
// Returns 0 for negative inputs and for sizes whose bound exceeds c_int.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub extern "C" fn lz4lite_compress_bound(src_size: c_int) -> c_int {
    if src_size < 0 || src_size as usize > MAX_INPUT_SIZE {
        return 0;
    }
    c_int::try_from(compress_bound(src_size as usize)).unwrap_or(0)
}
