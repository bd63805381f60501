//! Block-format constants, unaligned memory helpers, and copy primitives.
//!
//! Everything in here is shared by the encoder and the decoder:
//!   - Format constants (`MINMATCH`, `COPYLENGTH`, `LASTLITERALS`, …)
//!   - Unaligned little-endian reads/writes, host-order independent
//!   - `nb_common_bytes` and `count` (match-length extension by whole words)
//!   - `wild_copy8` and the small-offset tables used for overlapping matches

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in a block.
pub const MINMATCH: usize = 4;

/// Wild-copy granularity: chunked copies may write up to `COPYLENGTH - 1`
/// bytes past their logical end.
pub const COPYLENGTH: usize = 8;

/// The last `LASTLITERALS` bytes of an input are always emitted as literals.
pub const LASTLITERALS: usize = 5;

/// No match may start within the last `MFLIMIT` bytes of an input.
pub const MFLIMIT: usize = COPYLENGTH + MINMATCH;

/// Inputs shorter than this are emitted as a single literal run.
pub const MIN_LENGTH: usize = MFLIMIT + 1;

/// Log₂ of the largest encodable back-reference distance.
pub const MAXD_LOG: u32 = 16;

/// Largest encodable back-reference distance (fits the 2-byte offset field).
pub const MAX_DISTANCE: usize = (1 << MAXD_LOG) - 1;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

/// Inputs below this size use the narrow (16-bit offset) match table.
pub const NARROW_TABLE_LIMIT: usize = 64 * KB;

/// Largest input accepted by a single block call.
pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: u32 = (1u32 << ML_BITS) - 1;
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: u32 = (1u32 << RUN_BITS) - 1;

/// Higher → faster on incompressible data at the cost of compression ratio.
pub const SKIP_STRENGTH: u32 = 6;

/// Width of the match-extension word (`usize`).
pub const STEPSIZE: usize = core::mem::size_of::<usize>();

// ─────────────────────────────────────────────────────────────────────────────
// Unaligned native-order reads and writes
//
// All helpers go through `ptr::read_unaligned` / `ptr::write_unaligned`, so
// the pointer never has to be naturally aligned.
// ─────────────────────────────────────────────────────────────────────────────

/// Read a native-endian `u16` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 2 bytes.
#[inline(always)]
pub unsafe fn read16(ptr: *const u8) -> u16 {
    core::ptr::read_unaligned(ptr as *const u16)
}

/// Read a native-endian `u32` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 4 bytes.
#[inline(always)]
pub unsafe fn read32(ptr: *const u8) -> u32 {
    core::ptr::read_unaligned(ptr as *const u32)
}

/// Read a native-endian `u64` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 8 bytes.
#[inline(always)]
pub unsafe fn read64(ptr: *const u8) -> u64 {
    core::ptr::read_unaligned(ptr as *const u64)
}

/// Read a pointer-width word from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least `STEPSIZE` bytes.
#[inline(always)]
pub unsafe fn read_arch(ptr: *const u8) -> usize {
    core::ptr::read_unaligned(ptr as *const usize)
}

/// # Safety
/// `ptr` must be valid for writes of at least 2 bytes.
#[inline(always)]
pub unsafe fn write16(ptr: *mut u8, value: u16) {
    core::ptr::write_unaligned(ptr as *mut u16, value);
}

/// # Safety
/// `ptr` must be valid for writes of at least 4 bytes.
#[inline(always)]
pub unsafe fn write32(ptr: *mut u8, value: u32) {
    core::ptr::write_unaligned(ptr as *mut u32, value);
}

/// # Safety
/// `ptr` must be valid for writes of at least 8 bytes.
#[inline(always)]
pub unsafe fn write64(ptr: *mut u8, value: u64) {
    core::ptr::write_unaligned(ptr as *mut u64, value);
}

// ─────────────────────────────────────────────────────────────────────────────
// Little-endian views
//
// On little-endian hosts these pass straight through to the native helpers;
// big-endian hosts byte-swap.  Either way the result is bit-identical to
// `uN::from_le_bytes` over the same bytes.
// ─────────────────────────────────────────────────────────────────────────────

/// Read a little-endian `u16` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 2 bytes.
#[inline(always)]
pub unsafe fn read_le16(ptr: *const u8) -> u16 {
    u16::from_le(read16(ptr))
}

/// Read a little-endian `u32` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 4 bytes.
#[inline(always)]
pub unsafe fn read_le32(ptr: *const u8) -> u32 {
    u32::from_le(read32(ptr))
}

/// Read a little-endian `u64` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 8 bytes.
#[inline(always)]
pub unsafe fn read_le64(ptr: *const u8) -> u64 {
    u64::from_le(read64(ptr))
}

/// Write a little-endian `u16` to an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for writes of at least 2 bytes.
#[inline(always)]
pub unsafe fn write_le16(ptr: *mut u8, value: u16) {
    write16(ptr, value.to_le());
}

/// Write a little-endian `u32` to an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for writes of at least 4 bytes.
#[inline(always)]
pub unsafe fn write_le32(ptr: *mut u8, value: u32) {
    write32(ptr, value.to_le());
}

/// Write a little-endian `u64` to an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for writes of at least 8 bytes.
#[inline(always)]
pub unsafe fn write_le64(ptr: *mut u8, value: u64) {
    write64(ptr, value.to_le());
}

// ─────────────────────────────────────────────────────────────────────────────
// Small-offset lookup tables
// ─────────────────────────────────────────────────────────────────────────────

/// Advance applied to the match pointer after the first 4 bytes of a match
/// whose distance is below 8.
pub static INC32TABLE: [usize; 8] = [0, 1, 2, 1, 0, 4, 4, 4];

/// Back-off applied after the second 4 bytes, leaving the match pointer at a
/// distance ≥ 8 that is a multiple of the original period.
pub static DEC64TABLE: [isize; 8] = [0, 0, 0, -1, -4, 1, 2, 3];

// ─────────────────────────────────────────────────────────────────────────────
// Copy primitives
// ─────────────────────────────────────────────────────────────────────────────

/// Chunked copy that may write up to **7 bytes past** `dst_end`.
///
/// Always copies at least one 8-byte chunk.
///
/// # Safety
/// - `dst` must be writable up to `dst_end + COPYLENGTH - 1`.
/// - `src` must be readable for the same number of bytes.
/// - Each 8-byte source chunk must not overlap its destination chunk
///   (guaranteed when `src + 8 <= dst` or the buffers are distinct).
#[inline(always)]
pub unsafe fn wild_copy8(mut dst: *mut u8, mut src: *const u8, dst_end: *mut u8) {
    loop {
        core::ptr::copy_nonoverlapping(src, dst, COPYLENGTH);
        dst = dst.add(COPYLENGTH);
        src = src.add(COPYLENGTH);
        if dst >= dst_end {
            break;
        }
    }
}

/// Copy `len` bytes from `src` to `dst` one byte at a time.
///
/// Correct for overlapping back-references (`src < dst`), where every byte
/// read may have been produced earlier by this same copy.
///
/// # Safety
/// Both ranges must be valid for `len` bytes.
#[inline(always)]
pub unsafe fn byte_copy(mut dst: *mut u8, mut src: *const u8, len: usize) {
    let end = dst.add(len);
    while dst < end {
        *dst = *src;
        dst = dst.add(1);
        src = src.add(1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Common-byte counting
// ─────────────────────────────────────────────────────────────────────────────

/// Number of leading equal bytes between two words whose XOR is `val`.
///
/// Little-endian: `trailing_zeros / 8`.  Big-endian: `leading_zeros / 8`.
/// `val` **must** be non-zero.
#[inline(always)]
pub fn nb_common_bytes(val: usize) -> usize {
    debug_assert!(val != 0);
    #[cfg(target_endian = "little")]
    {
        (val.trailing_zeros() >> 3) as usize
    }
    #[cfg(not(target_endian = "little"))]
    {
        (val.leading_zeros() >> 3) as usize
    }
}

/// Count how many bytes match between `p_in` and `p_match`, stopping at
/// `p_in_limit`.
///
/// Compares a machine word at a time and narrows to 4/2/1-byte comparisons
/// for the tail.
///
/// # Safety
/// - `p_in <= p_in_limit`.
/// - `p_in` is readable up to `p_in_limit`; `p_match` is readable for the
///   same number of bytes.
#[inline(always)]
pub unsafe fn count(mut p_in: *const u8, mut p_match: *const u8, p_in_limit: *const u8) -> usize {
    let p_start = p_in;

    while (p_in_limit as usize - p_in as usize) >= STEPSIZE {
        let diff = read_arch(p_match) ^ read_arch(p_in);
        if diff == 0 {
            p_in = p_in.add(STEPSIZE);
            p_match = p_match.add(STEPSIZE);
            continue;
        }
        p_in = p_in.add(nb_common_bytes(diff));
        return p_in as usize - p_start as usize;
    }

    if STEPSIZE == 8 && (p_in_limit as usize - p_in as usize) >= 4 && read32(p_match) == read32(p_in) {
        p_in = p_in.add(4);
        p_match = p_match.add(4);
    }
    if (p_in_limit as usize - p_in as usize) >= 2 && read16(p_match) == read16(p_in) {
        p_in = p_in.add(2);
        p_match = p_match.add(2);
    }
    if p_in < p_in_limit && *p_match == *p_in {
        p_in = p_in.add(1);
    }
    p_in as usize - p_start as usize
}
