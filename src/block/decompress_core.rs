//! Block decompression core engine.
//!
//! One per-sequence step, [`decode_sequence`], is shared by both public
//! decoders; they differ only in [`DecodeMode`], i.e. in when the loop stops
//! and what the call returns.
//!
//! # Security boundary
//!
//! This is the path that sees untrusted bytes.  Every read from the source
//! is checked against the end of the source slice, and every write to the
//! destination is checked against the end of the destination slice before
//! it happens.  Malformed or truncated input returns a [`DecompressError`]
//! carrying the input offset reached so far; it never panics and never
//! touches memory outside the two slices.
//!
//! All `unsafe` blocks carry a `// SAFETY:` comment.

use core::ptr;

use thiserror::Error;

use super::types::{
    byte_copy, read_le16, wild_copy8, COPYLENGTH, DEC64TABLE, INC32TABLE, MINMATCH, ML_BITS,
    ML_MASK, RUN_MASK,
};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by block decompression.
///
/// Each corruption variant records `position`, the number of source bytes
/// consumed when the problem was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecompressError {
    /// Decoding the next literal run or match would write past the end of
    /// the destination.
    #[error("output overflow at input offset {position}")]
    OutputOverflow { position: usize },
    /// A back-reference points before the start of the destination.
    #[error("back-reference before output start at input offset {position}")]
    BackReferenceUnderflow { position: usize },
    /// A back-reference with distance zero.
    #[error("zero match offset at input offset {position}")]
    ZeroOffset { position: usize },
    /// The source ended in the middle of a sequence.
    #[error("truncated input at offset {position}")]
    TruncatedInput { position: usize },
    /// A caller-supplied argument is unusable (null pointer, negative size).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl DecompressError {
    /// Approximate input offset of the failure (0 for argument errors).
    pub fn position(&self) -> usize {
        match *self {
            DecompressError::OutputOverflow { position }
            | DecompressError::BackReferenceUnderflow { position }
            | DecompressError::ZeroOffset { position }
            | DecompressError::TruncatedInput { position } => position,
            DecompressError::InvalidArgument(_) => 0,
        }
    }

    /// Signed status code: the negated failure offset, never zero.
    pub fn status(&self) -> i64 {
        -(self.position().max(1) as i64)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode modes
// ─────────────────────────────────────────────────────────────────────────────

/// How the decode loop terminates and what it reports.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodeMode {
    /// The destination length is the exact decompressed size.  Decoding
    /// stops at the literal run that lands within `COPYLENGTH` of the end;
    /// the call reports source bytes consumed.
    ExactOutput,
    /// The destination length is only an upper bound.  Decoding stops when
    /// the source is exhausted; the call reports bytes produced.
    BoundedOutput,
}

/// Outcome of one sequence.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Continue,
    Done,
}

// ─────────────────────────────────────────────────────────────────────────────
// Cursor
// ─────────────────────────────────────────────────────────────────────────────

/// Read/write positions over one source and one destination slice.
pub(crate) struct Cursor {
    src: *const u8,
    ip: *const u8,
    iend: *const u8,
    dst: *mut u8,
    op: *mut u8,
    oend: *mut u8,
}

impl Cursor {
    pub(crate) fn new(src: &[u8], dst: &mut [u8]) -> Self {
        let src_range = src.as_ptr_range();
        let dst_range = dst.as_mut_ptr_range();
        Self {
            src: src_range.start,
            ip: src_range.start,
            iend: src_range.end,
            dst: dst_range.start,
            op: dst_range.start,
            oend: dst_range.end,
        }
    }

    #[inline(always)]
    pub(crate) fn consumed(&self) -> usize {
        self.ip as usize - self.src as usize
    }

    #[inline(always)]
    pub(crate) fn produced(&self) -> usize {
        self.op as usize - self.dst as usize
    }

    #[inline(always)]
    fn input_left(&self) -> usize {
        self.iend as usize - self.ip as usize
    }

    #[inline(always)]
    fn output_left(&self) -> usize {
        self.oend as usize - self.op as usize
    }

    #[inline(always)]
    fn truncated(&self) -> DecompressError {
        DecompressError::TruncatedInput { position: self.consumed() }
    }

    #[inline(always)]
    fn overflow(&self) -> DecompressError {
        DecompressError::OutputOverflow { position: self.consumed() }
    }

    /// Read one source byte.
    #[inline(always)]
    fn next_byte(&mut self) -> Result<u8, DecompressError> {
        if self.ip >= self.iend {
            return Err(self.truncated());
        }
        // SAFETY: ip < iend, so ip addresses a byte of the source slice.
        let b = unsafe { *self.ip };
        self.ip = self.ip.wrapping_add(1);
        Ok(b)
    }

    /// Sum the extension bytes that follow a saturated nibble: 255 adds and
    /// continues, anything smaller adds and stops.
    #[inline(always)]
    fn read_length_extension(&mut self) -> Result<usize, DecompressError> {
        let mut total: usize = 0;
        loop {
            let s = self.next_byte()?;
            total = total.saturating_add(s as usize);
            if s != 255 {
                return Ok(total);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Match copy
// ─────────────────────────────────────────────────────────────────────────────

/// Copy a back-reference with room to spare after it.
///
/// Distances below `COPYLENGTH` go through the small-offset tables: the
/// first 8 bytes are built so that afterwards the source trails the
/// destination by at least 8 bytes (a multiple of the period), after which
/// plain 8-byte chunks replicate the pattern.
///
/// # Safety
/// - `mp == op - offset`, `offset >= 1`, and `mp` lies inside the destination.
/// - `length >= MINMATCH`.
/// - The destination is writable up to `op + length + COPYLENGTH`.
#[inline(always)]
unsafe fn copy_match(mut op: *mut u8, mut mp: *const u8, offset: usize, length: usize) {
    debug_assert!(offset >= 1 && length >= MINMATCH);
    let end = op.add(length);

    if offset < COPYLENGTH {
        *op = *mp;
        *op.add(1) = *mp.add(1);
        *op.add(2) = *mp.add(2);
        *op.add(3) = *mp.add(3);
        mp = mp.add(INC32TABLE[offset]);
        ptr::copy_nonoverlapping(mp, op.add(4), 4);
        mp = mp.offset(-DEC64TABLE[offset]);
    } else {
        ptr::copy_nonoverlapping(mp, op, COPYLENGTH);
        mp = mp.add(COPYLENGTH);
    }
    op = op.add(COPYLENGTH);

    if op < end {
        wild_copy8(op, mp, end);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-sequence step
// ─────────────────────────────────────────────────────────────────────────────

/// Decode one sequence: control byte, literal run, and (unless the stream
/// ends here) one back-reference.
pub(crate) fn decode_sequence(c: &mut Cursor, mode: DecodeMode) -> Result<Step, DecompressError> {
    let token = c.next_byte()?;

    // ── Literal run ──────────────────────────────────────────────────────────
    let mut length = (token >> ML_BITS) as usize;
    if length == RUN_MASK as usize {
        length = length.saturating_add(c.read_length_extension()?);
    }
    if length > c.input_left() {
        return Err(c.truncated());
    }

    let room = c.output_left();
    if length.saturating_add(COPYLENGTH) > room {
        // The run ends inside the safety margin: this is the last sequence.
        if length > room {
            return Err(c.overflow());
        }
        // Any further sequence would need at least MINMATCH + LASTLITERALS
        // more bytes of output than remain.
        if mode == DecodeMode::BoundedOutput && length != c.input_left() {
            return Err(c.overflow());
        }
        // SAFETY: `length` bytes are available on both sides (checked above);
        // source and destination are distinct slices.
        unsafe {
            ptr::copy_nonoverlapping(c.ip, c.op, length);
            c.ip = c.ip.add(length);
            c.op = c.op.add(length);
        }
        return Ok(Step::Done);
    }

    // SAFETY: length + COPYLENGTH <= room, so the wild copy's overrun of at
    // most 7 bytes stays inside the destination.  The source is only
    // over-read when it has COPYLENGTH bytes to spare.
    unsafe {
        let cpy = c.op.add(length);
        if c.input_left() >= length + COPYLENGTH {
            wild_copy8(c.op, c.ip, cpy);
        } else {
            ptr::copy_nonoverlapping(c.ip, c.op, length);
        }
        c.ip = c.ip.add(length);
        c.op = cpy;
    }

    if mode == DecodeMode::BoundedOutput && c.ip >= c.iend {
        return Ok(Step::Done);
    }

    // ── Offset ───────────────────────────────────────────────────────────────
    if c.input_left() < 2 {
        return Err(c.truncated());
    }
    // SAFETY: two source bytes remain.
    let offset = unsafe { read_le16(c.ip) } as usize;
    c.ip = c.ip.wrapping_add(2);
    if offset > c.produced() {
        return Err(DecompressError::BackReferenceUnderflow { position: c.consumed() });
    }
    if offset == 0 {
        return Err(DecompressError::ZeroOffset { position: c.consumed() });
    }

    // ── Match length ─────────────────────────────────────────────────────────
    let mut length = (token & ML_MASK as u8) as usize;
    if length == ML_MASK as usize {
        length = length.saturating_add(c.read_length_extension()?);
    }
    let length = length.saturating_add(MINMATCH);

    // ── Match copy ───────────────────────────────────────────────────────────
    let room = c.output_left();
    if length > room {
        return Err(c.overflow());
    }

    // SAFETY: 1 <= offset <= produced, so the match source lies inside the
    // already-written part of the destination.
    let mp = unsafe { c.op.sub(offset) } as *const u8;

    if length + COPYLENGTH > room {
        // Near the end: exact byte-wise copy, no overrun allowed.
        // SAFETY: op + length <= oend; byte order makes overlap correct.
        unsafe {
            byte_copy(c.op, mp, length);
            c.op = c.op.add(length);
        }
        // A bounded decode keeps going so that leftover input is reported.
        let filled = c.op == c.oend && mode == DecodeMode::ExactOutput;
        return Ok(if filled { Step::Done } else { Step::Continue });
    }

    // SAFETY: op + length + COPYLENGTH <= oend; see `copy_match`.
    unsafe {
        copy_match(c.op, mp, offset, length);
        c.op = c.op.add(length);
    }
    Ok(Step::Continue)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode loop
// ─────────────────────────────────────────────────────────────────────────────

/// Decode a whole block.
///
/// Returns source bytes consumed for [`DecodeMode::ExactOutput`] and
/// destination bytes produced for [`DecodeMode::BoundedOutput`].
pub fn decompress_generic(
    src: &[u8],
    dst: &mut [u8],
    mode: DecodeMode,
) -> Result<usize, DecompressError> {
    let mut cursor = Cursor::new(src, dst);

    match mode {
        DecodeMode::ExactOutput => {
            while decode_sequence(&mut cursor, mode)? == Step::Continue {}
            Ok(cursor.consumed())
        }
        DecodeMode::BoundedOutput => {
            while cursor.input_left() > 0 {
                if decode_sequence(&mut cursor, mode)? == Step::Done {
                    break;
                }
            }
            Ok(cursor.produced())
        }
    }
}
