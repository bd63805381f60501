// lz4lite: speed-oriented LZ77 block codec, container, and CLI

pub mod block;
pub mod cli;
pub mod config;
pub mod frame;
pub mod xxhash;

#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ────────────────────────────────────────────────────────
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 3;
pub const VERSION_RELEASE: u32 = 0;
pub const VERSION_NUMBER: u32 = VERSION_MAJOR * 100 * 100 + VERSION_MINOR * 100 + VERSION_RELEASE;
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress, compress_bound, compress_to_vec, compress_with_context, decompress,
    decompress_to_vec, decompress_unknown_size, CompressContext, CompressError, DecompressError,
};
pub use frame::{compress_frame, decompress_frame, FrameError, FrameOptions};
