//! Block compression: greedy single-pass encoder and its entry points.
//!
//! | Rust function              | Role                                              |
//! |----------------------------|---------------------------------------------------|
//! | [`compress_generic`]       | hot loop, generic over the [`MatchTable`] width   |
//! | [`compress`]               | one-shot; picks the variant, tables on the stack  |
//! | [`compress_with_context`]  | same, reusing a caller-owned [`CompressContext`]  |
//! | [`compress_with_table`]    | drive a specific table width directly             |
//! | [`compress_to_vec`]        | allocate a bound-sized buffer and compress into it|
//! | [`compress_bound`]         | worst-case output size for an input length        |
//!
//! Inputs below [`NARROW_TABLE_LIMIT`] use the compact variant (16-bit
//! [`NarrowTable`]); larger inputs use the general variant ([`WideTable`],
//! explicit distance check).  Both are the same code instantiated twice.
//!
//! The destination must hold at least [`compress_bound`] bytes.  That bound
//! is checked once at entry; the hot loop itself never tests for room.

use core::ptr;

use log::trace;
use thiserror::Error;

use super::match_finder::{CompressContext, MatchTable, NarrowTable, WideTable};
use super::types::{
    count, read32, write_le16, LASTLITERALS, MAX_DISTANCE, MAX_INPUT_SIZE, MFLIMIT, MINMATCH,
    MIN_LENGTH, ML_BITS, ML_MASK, NARROW_TABLE_LIMIT, RUN_MASK, SKIP_STRENGTH,
};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by the block compression entry points.
///
/// All of them are argument-validation failures raised before any byte of
/// output is produced; the encoder itself cannot fail once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompressError {
    /// The input exceeds [`MAX_INPUT_SIZE`].
    #[error("input of {len} bytes exceeds the block limit of {max} bytes", max = MAX_INPUT_SIZE)]
    InputTooLarge { len: usize },
    /// The destination is smaller than [`compress_bound`] of the input.
    #[error("destination holds {available} bytes but {required} are required")]
    DestinationTooSmall { required: usize, available: usize },
    /// A caller-supplied argument is unusable (null pointer, negative size,
    /// table width unfit for the input length).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Variant selection
// ─────────────────────────────────────────────────────────────────────────────

/// Which instantiation of the encoder handles a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderVariant {
    /// 16-bit table, no distance check.  Inputs below 64 KiB.
    Compact,
    /// 32-bit table, explicit distance check.  Inputs of 64 KiB and above.
    General,
}

/// Variant used for an input of `input_size` bytes.
#[inline]
pub fn select_variant(input_size: usize) -> EncoderVariant {
    if input_size < NARROW_TABLE_LIMIT {
        EncoderVariant::Compact
    } else {
        EncoderVariant::General
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for an input of `input_size` bytes:
/// `input_size + max(8, ceil(input_size × 5%))`.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    input_size.saturating_add(core::cmp::max(8, input_size.div_ceil(20)))
}

fn validate(src: &[u8], dst: &[u8]) -> Result<(), CompressError> {
    if src.len() > MAX_INPUT_SIZE {
        return Err(CompressError::InputTooLarge { len: src.len() });
    }
    let required = compress_bound(src.len());
    if dst.len() < required {
        return Err(CompressError::DestinationTooSmall {
            required,
            available: dst.len(),
        });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Token / length writers
// ─────────────────────────────────────────────────────────────────────────────

/// Write the bytes that follow a saturated nibble: `len / 255` bytes of 255
/// then the remainder.
///
/// # Safety
/// `op` must have room for `len / 255 + 1` bytes.
#[inline(always)]
unsafe fn write_length_extension(mut op: *mut u8, mut len: usize) -> *mut u8 {
    while len >= 255 {
        *op = 255;
        op = op.add(1);
        len -= 255;
    }
    *op = len as u8;
    op.add(1)
}

/// Set the literal-run nibble of `token` and write any extension bytes at `op`.
///
/// # Safety
/// `token` is writable; `op` has room for the extension bytes.
#[inline(always)]
unsafe fn write_literal_length(token: *mut u8, op: *mut u8, length: usize) -> *mut u8 {
    if length >= RUN_MASK as usize {
        *token = (RUN_MASK << ML_BITS) as u8;
        write_length_extension(op, length - RUN_MASK as usize)
    } else {
        *token = (length << ML_BITS) as u8;
        op
    }
}

/// Add the match-length nibble to `token` (length already excludes
/// `MINMATCH`) and write any extension bytes at `op`.
///
/// # Safety
/// Same as [`write_literal_length`].
#[inline(always)]
unsafe fn write_match_length(token: *mut u8, op: *mut u8, length: usize) -> *mut u8 {
    if length >= ML_MASK as usize {
        *token += ML_MASK as u8;
        write_length_extension(op, length - ML_MASK as usize)
    } else {
        *token += length as u8;
        op
    }
}

/// A table hit is usable only if the 4 bytes really match and, for tables
/// that can hold distant positions, the offset fits in 16 bits.
///
/// # Safety
/// Both pointers readable for 4 bytes, `candidate < ip`.
#[inline(always)]
unsafe fn accept_candidate<T: MatchTable>(candidate: *const u8, ip: *const u8) -> bool {
    if T::CHECK_DISTANCE && (ip as usize - candidate as usize) > MAX_DISTANCE {
        return false;
    }
    read32(candidate) == read32(ip)
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Greedy LZ77 encoder over a single hash table.
///
/// Returns the number of bytes written to `dst`.
///
/// # Safety
/// - `dst.len() >= compress_bound(src.len())`.
/// - `src.len() <= MAX_INPUT_SIZE`.
/// - When `T::CHECK_DISTANCE` is false, `src.len() < NARROW_TABLE_LIMIT`.
/// - `table` holds no position at or beyond `src.len()` (a freshly zeroed
///   table satisfies this).
pub unsafe fn compress_generic<T: MatchTable>(table: &mut T, src: &[u8], dst: &mut [u8]) -> usize {
    debug_assert!(dst.len() >= compress_bound(src.len()));
    debug_assert!(T::CHECK_DISTANCE || src.len() < NARROW_TABLE_LIMIT);

    let input_size = src.len();
    let base: *const u8 = src.as_ptr();
    let iend: *const u8 = base.add(input_size);

    let mut ip: *const u8 = base;
    let mut anchor: *const u8 = base;
    let mut op: *mut u8 = dst.as_mut_ptr();

    'compress: {
        // Too short for a match plus the mandatory trailing literals.
        if input_size < MIN_LENGTH {
            break 'compress;
        }

        let mflimit: *const u8 = iend.sub(MFLIMIT);
        let matchlimit: *const u8 = iend.sub(LASTLITERALS);

        // ── First byte ───────────────────────────────────────────────────────
        table.put(T::hash(read32(ip)), 0);
        ip = ip.add(1);
        let mut forward_h = T::hash(read32(ip));

        'main: loop {
            let mut match_ptr: *const u8;

            // ── Find a match ─────────────────────────────────────────────────
            // The step grows by one every 2^SKIP_STRENGTH failed probes, so
            // incompressible stretches are skipped at an accelerating pace.
            {
                let mut attempts: usize = (1 << SKIP_STRENGTH) + 3;
                let mut forward_ip = ip;
                loop {
                    let h = forward_h;
                    let step = attempts >> SKIP_STRENGTH;
                    attempts += 1;
                    ip = forward_ip;
                    forward_ip = ip.wrapping_add(step);

                    if forward_ip > mflimit {
                        break 'compress;
                    }

                    forward_h = T::hash(read32(forward_ip));
                    match_ptr = base.add(table.get(h));
                    table.put(h, ip as usize - base as usize);

                    if accept_candidate::<T>(match_ptr, ip) {
                        break;
                    }
                }
            }

            // ── Catch up ─────────────────────────────────────────────────────
            while ip > anchor && match_ptr > base && *ip.sub(1) == *match_ptr.sub(1) {
                ip = ip.sub(1);
                match_ptr = match_ptr.sub(1);
            }

            // ── Encode literals ──────────────────────────────────────────────
            let mut token: *mut u8 = op;
            {
                let lit_length = ip as usize - anchor as usize;
                op = write_literal_length(token, op.add(1), lit_length);
                ptr::copy_nonoverlapping(anchor, op, lit_length);
                op = op.add(lit_length);
            }

            // ── Encode match, then probe the next position directly ──────────
            // A hit right after a match becomes a zero-literal sequence without
            // going back through the stepped search.
            'next_match: loop {
                write_le16(op, (ip as usize - match_ptr as usize) as u16);
                op = op.add(2);

                ip = ip.add(MINMATCH);
                match_ptr = match_ptr.add(MINMATCH);
                let match_length = count(ip, match_ptr, matchlimit);
                ip = ip.add(match_length);
                op = write_match_length(token, op, match_length);

                anchor = ip;
                if ip > mflimit {
                    break 'compress;
                }

                // Fill table
                let p = ip.sub(2);
                table.put(T::hash(read32(p)), p as usize - base as usize);

                // Test next position
                let h = T::hash(read32(ip));
                match_ptr = base.add(table.get(h));
                table.put(h, ip as usize - base as usize);
                if accept_candidate::<T>(match_ptr, ip) {
                    token = op;
                    *token = 0;
                    op = op.add(1);
                    continue 'next_match;
                }

                ip = ip.add(1);
                forward_h = T::hash(read32(ip));
                continue 'main;
            }
        }
    }

    // ── Last literals ────────────────────────────────────────────────────────
    {
        let last_run = iend as usize - anchor as usize;
        let token = op;
        op = write_literal_length(token, op.add(1), last_run);
        ptr::copy_nonoverlapping(anchor, op, last_run);
        op = op.add(last_run);
    }

    op as usize - dst.as_ptr() as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Public entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst`, choosing the encoder variant by input size.
///
/// `dst` must hold at least [`compress_bound`]`(src.len())` bytes.  The match
/// table lives on the stack for the duration of the call.
///
/// Returns the number of bytes written.
pub fn compress(src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
    validate(src, dst)?;
    let variant = select_variant(src.len());
    // SAFETY: `validate` enforced the size contract; the tables are new.
    let written = unsafe {
        match variant {
            EncoderVariant::Compact => compress_generic(&mut NarrowTable::new(), src, dst),
            EncoderVariant::General => compress_generic(&mut WideTable::new(), src, dst),
        }
    };
    trace!("compressed {} -> {} bytes ({:?})", src.len(), written, variant);
    Ok(written)
}

/// Compress `src` into `dst` using the tables owned by `ctx`.
///
/// The selected table is zeroed before use, so the output is identical to
/// [`compress`] regardless of what `ctx` was used for previously.
pub fn compress_with_context(
    ctx: &mut CompressContext,
    src: &[u8],
    dst: &mut [u8],
) -> Result<usize, CompressError> {
    validate(src, dst)?;
    let variant = select_variant(src.len());
    // SAFETY: `validate` enforced the size contract; `fresh_*` zeroes the table.
    let written = unsafe {
        match variant {
            EncoderVariant::Compact => compress_generic(ctx.fresh_narrow(), src, dst),
            EncoderVariant::General => compress_generic(ctx.fresh_wide(), src, dst),
        }
    };
    trace!("compressed {} -> {} bytes ({:?}, reused context)", src.len(), written, variant);
    Ok(written)
}

/// Compress with an explicitly chosen table width.
///
/// The wide table accepts any input; the narrow table is refused for inputs
/// of 64 KiB or more.  The table is reset before use.
pub fn compress_with_table<T: MatchTable>(
    table: &mut T,
    src: &[u8],
    dst: &mut [u8],
) -> Result<usize, CompressError> {
    validate(src, dst)?;
    if !T::CHECK_DISTANCE && src.len() >= NARROW_TABLE_LIMIT {
        return Err(CompressError::InvalidArgument(
            "narrow match table cannot index inputs of 64 KiB or more",
        ));
    }
    table.reset();
    // SAFETY: size contract validated above; table freshly reset.
    Ok(unsafe { compress_generic(table, src, dst) })
}

/// Compress `src` into a newly allocated, exactly-sized `Vec`.
pub fn compress_to_vec(src: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let written = compress(src, &mut dst)?;
    dst.truncate(written);
    Ok(dst)
}
