//! Container content checksum: XXH32 with seed 0, via the `xxhash-rust`
//! crate.

use xxhash_rust::xxh32::{xxh32, Xxh32};

/// Seed used for every content checksum.
pub const CHECKSUM_SEED: u32 = 0;

/// One-shot checksum of a complete buffer.
#[inline]
pub fn content_checksum(data: &[u8]) -> u32 {
    xxh32(data, CHECKSUM_SEED)
}

/// Incremental checksum fed block by block.
#[derive(Clone)]
pub struct ContentHasher(Xxh32);

impl ContentHasher {
    pub fn new() -> Self {
        Self(Xxh32::new(CHECKSUM_SEED))
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    pub fn finish(&self) -> u32 {
        self.0.digest()
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}
