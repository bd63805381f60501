//! Block compression and decompression.
//!
//! A block is a self-contained sequence of (literal run, back-reference)
//! pairs with no header; the caller carries the decompressed size.

pub mod compress;
pub mod decompress_api;
pub mod decompress_core;
pub mod match_finder;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{
    compress, compress_bound, compress_to_vec, compress_with_context, compress_with_table,
    select_variant, CompressError, EncoderVariant,
};
pub use decompress_api::{
    decompress, decompress_to_vec, decompress_to_vec_bounded, decompress_unknown_size,
};
pub use decompress_core::{DecodeMode, DecompressError};
pub use match_finder::{CompressContext, MatchTable, NarrowTable, WideTable};
pub use types::{MAX_DISTANCE, MAX_INPUT_SIZE, MIN_LENGTH, NARROW_TABLE_LIMIT};
