//! E2E Test Suite: Block One-Shot API
//!
//! Validates the block compression and decompression entry points on
//! realistic inputs:
//! - compress / compress_to_vec / compress_with_context
//! - compress_bound
//! - decompress (exact size) / decompress_unknown_size (bounded)

use lz4lite::{
    compress, compress_bound, compress_to_vec, compress_with_context, decompress,
    decompress_to_vec, decompress_unknown_size, CompressContext,
};

fn mixed_corpus(len: usize) -> Vec<u8> {
    // Alternating stretches of text, zeros, and noise.
    let mut out = Vec::with_capacity(len);
    let mut seed = 0x1234_5678u32;
    while out.len() < len {
        out.extend_from_slice(b"The quick brown fox jumps over the lazy dog. ");
        out.extend(std::iter::repeat(0u8).take(300));
        for _ in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            out.push(seed as u8);
        }
    }
    out.truncate(len);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: typical data round-trip and ratio
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_roundtrip_typical_data() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let mut compressed = vec![0u8; compress_bound(original.len())];
    let n = compress(&original, &mut compressed).expect("compression should succeed");
    assert!(n < original.len(), "compressed size {n} should be below {}", original.len());

    let mut decompressed = vec![0u8; original.len()];
    let consumed = decompress(&compressed[..n], &mut decompressed).expect("decompression");
    assert_eq!(consumed, n);
    assert_eq!(decompressed, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: incompressible data stays within the bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_roundtrip_incompressible_data() {
    let original: Vec<u8> = (0..=255u8).cycle().take(256).collect();
    let packed = compress_to_vec(&original).unwrap();
    assert!(packed.len() <= compress_bound(original.len()));
    assert_eq!(decompress_to_vec(&packed, original.len()).unwrap(), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: both encoder variants on a mixed corpus
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compact_and_general_variants() {
    for len in [10_000usize, 65_535, 65_536, 1_000_000] {
        let original = mixed_corpus(len);
        let packed = compress_to_vec(&original).unwrap();
        assert!(packed.len() < original.len(), "len {len}");
        assert_eq!(decompress_to_vec(&packed, len).unwrap(), original, "len {len}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: one context across many inputs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_context_reuse_across_sizes() {
    let mut ctx = CompressContext::new();
    for len in [100usize, 100_000, 5, 70_000, 64 * 1024 - 1] {
        let original = mixed_corpus(len);
        let mut dst = vec![0u8; compress_bound(len)];
        let n = compress_with_context(&mut ctx, &original, &mut dst).unwrap();
        assert_eq!(&dst[..n], &compress_to_vec(&original).unwrap()[..]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: unknown-size decoding into a generous buffer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_size_decode() {
    let original = mixed_corpus(123_457);
    let packed = compress_to_vec(&original).unwrap();
    let mut dst = vec![0u8; 200_000];
    let produced = decompress_unknown_size(&packed, &mut dst).unwrap();
    assert_eq!(produced, original.len());
    assert_eq!(&dst[..produced], &original[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: long runs at several byte values
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_long_runs() {
    for byte in [0u8, 0x41, 0xFF] {
        let original = vec![byte; 1_000_000];
        let packed = compress_to_vec(&original).unwrap();
        assert!(packed.len() < 5_000);
        assert_eq!(decompress_to_vec(&packed, original.len()).unwrap(), original);
    }
}
