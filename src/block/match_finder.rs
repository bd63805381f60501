//! Single-slot hash tables used by the encoder to find match candidates.
//!
//! Each table maps the multiplicative hash of a 4-byte prefix to the most
//! recent input position carrying that hash.  There is no chaining: a `put`
//! evicts whatever was stored in the bucket before.  A candidate returned by
//! `get` is only a hint; the encoder re-checks the actual bytes and the
//! back-reference distance before trusting it.
//!
//! Two widths exist:
//!
//! | Table          | Entry  | Slots | Used for            | Distance check |
//! |----------------|--------|-------|---------------------|----------------|
//! | [`WideTable`]  | `u32`  | 4096  | inputs ≥ 64 KiB     | explicit       |
//! | [`NarrowTable`]| `u16`  | 8192  | inputs < 64 KiB     | structural     |
//!
//! Both occupy 16 KiB.  [`CompressContext`] owns one of each on the heap so
//! a caller can reuse the allocation across calls; every compression through
//! the context clears the table it is about to use.

use super::types::{MINMATCH, NARROW_TABLE_LIMIT};

/// Knuth multiplicative hashing constant (2^32 / φ).
pub const HASH_MULTIPLIER: u32 = 2_654_435_761;

/// Log₂ of the wide table's slot count.
pub const WIDE_HASH_LOG: u32 = 12;

/// Log₂ of the narrow table's slot count (one more bit: half-width entries).
pub const NARROW_HASH_LOG: u32 = WIDE_HASH_LOG + 1;

pub const WIDE_TABLE_SLOTS: usize = 1 << WIDE_HASH_LOG;
pub const NARROW_TABLE_SLOTS: usize = 1 << NARROW_HASH_LOG;

// ─────────────────────────────────────────────────────────────────────────────
// MatchTable trait
// ─────────────────────────────────────────────────────────────────────────────

/// A position table indexed by the hash of a 4-byte window.
///
/// Implementations differ only in slot width and whether the encoder must
/// check the back-reference distance explicitly.
pub trait MatchTable {
    /// Number of hash bits kept; the table has `1 << HASH_LOG` slots.
    const HASH_LOG: u32;

    /// `true` when stored positions may lie further back than the 2-byte
    /// offset field can encode.
    const CHECK_DISTANCE: bool;

    /// Zero every slot.
    fn reset(&mut self);

    /// Position stored in bucket `h`.
    fn get(&self, h: usize) -> usize;

    /// Overwrite bucket `h` with `pos`.
    fn put(&mut self, h: usize, pos: usize);

    /// Bucket index for a 4-byte window read as a native-order `u32`.
    #[inline(always)]
    fn hash(sequence: u32) -> usize {
        (sequence.wrapping_mul(HASH_MULTIPLIER) >> ((MINMATCH as u32 * 8) - Self::HASH_LOG))
            as usize
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wide table
// ─────────────────────────────────────────────────────────────────────────────

/// `u32`-entry table for inputs of any size.
#[derive(Clone)]
pub struct WideTable {
    slots: [u32; WIDE_TABLE_SLOTS],
}

impl WideTable {
    pub const fn new() -> Self {
        Self { slots: [0; WIDE_TABLE_SLOTS] }
    }
}

impl Default for WideTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchTable for WideTable {
    const HASH_LOG: u32 = WIDE_HASH_LOG;
    const CHECK_DISTANCE: bool = true;

    #[inline]
    fn reset(&mut self) {
        self.slots.fill(0);
    }

    #[inline(always)]
    fn get(&self, h: usize) -> usize {
        self.slots[h] as usize
    }

    #[inline(always)]
    fn put(&mut self, h: usize, pos: usize) {
        debug_assert!(pos <= u32::MAX as usize);
        self.slots[h] = pos as u32;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Narrow table
// ─────────────────────────────────────────────────────────────────────────────

/// `u16`-entry table, valid only for inputs shorter than
/// [`NARROW_TABLE_LIMIT`].
///
/// Every stored position is below 65 536, so the distance to any later
/// position always fits the 2-byte offset field.
#[derive(Clone)]
pub struct NarrowTable {
    slots: [u16; NARROW_TABLE_SLOTS],
}

impl NarrowTable {
    pub const fn new() -> Self {
        Self { slots: [0; NARROW_TABLE_SLOTS] }
    }
}

impl Default for NarrowTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchTable for NarrowTable {
    const HASH_LOG: u32 = NARROW_HASH_LOG;
    const CHECK_DISTANCE: bool = false;

    #[inline]
    fn reset(&mut self) {
        self.slots.fill(0);
    }

    #[inline(always)]
    fn get(&self, h: usize) -> usize {
        self.slots[h] as usize
    }

    #[inline(always)]
    fn put(&mut self, h: usize, pos: usize) {
        debug_assert!(pos < NARROW_TABLE_LIMIT);
        self.slots[h] = pos as u16;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reusable scratch
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-owned scratch for repeated compression calls.
///
/// Holds one table of each width on the heap.  The table selected for a call
/// is zeroed before the call's hot loop runs, so nothing leaks from one call
/// into the next.  A context is borrowed mutably for the duration of a call,
/// which keeps it from being shared between concurrent calls; give each
/// thread its own.
#[derive(Clone, Default)]
pub struct CompressContext {
    wide: Box<WideTable>,
    narrow: Box<NarrowTable>,
}

impl CompressContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wide table, cleared and ready for a new input.
    pub(crate) fn fresh_wide(&mut self) -> &mut WideTable {
        self.wide.reset();
        &mut self.wide
    }

    /// The narrow table, cleared and ready for a new input.
    pub(crate) fn fresh_narrow(&mut self) -> &mut NarrowTable {
        self.narrow.reset();
        &mut self.narrow
    }
}

impl core::fmt::Debug for CompressContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompressContext")
            .field("wide_slots", &WIDE_TABLE_SLOTS)
            .field("narrow_slots", &NARROW_TABLE_SLOTS)
            .finish()
    }
}
