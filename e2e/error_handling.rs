//! E2E Test Suite: Error Handling
//!
//! Corrupt, truncated, and mis-sized inputs must produce errors (never
//! panics, never writes outside the destination), and every error must
//! carry a usable position and status.

use lz4lite::block::{
    compress, compress_bound, compress_to_vec, decompress, decompress_unknown_size,
    CompressError, DecompressError,
};
use lz4lite::frame::{compress_frame, decompress_frame, FrameError, FrameOptions};

fn sample() -> Vec<u8> {
    b"error handling must be boring and predictable; "
        .iter()
        .copied()
        .cycle()
        .take(20_000)
        .collect()
}

#[test]
fn test_destination_too_small_for_compress() {
    let src = sample();
    let mut dst = vec![0u8; 16];
    match compress(&src, &mut dst) {
        Err(CompressError::DestinationTooSmall { required, available }) => {
            assert_eq!(required, compress_bound(src.len()));
            assert_eq!(available, 16);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_truncation_sweep() {
    let src = sample();
    let packed = compress_to_vec(&src).unwrap();
    let mut dst = vec![0u8; src.len()];
    for cut in (0..packed.len()).step_by(7) {
        let err = decompress(&packed[..cut], &mut dst).unwrap_err();
        assert!(err.status() < 0);
        assert!(err.position() <= cut);
    }
}

#[test]
fn test_guard_bytes_untouched() {
    // Decode into the middle of a larger buffer and check the surroundings.
    let src = sample();
    let packed = compress_to_vec(&src).unwrap();
    for cap in [0usize, 1, 17, 1000, src.len() - 1] {
        let mut buf = vec![0xEEu8; cap + 64];
        let r = decompress_unknown_size(&packed, &mut buf[32..32 + cap]);
        assert!(matches!(r, Err(DecompressError::OutputOverflow { .. })), "cap {cap}: {r:?}");
        assert!(buf[..32].iter().all(|&b| b == 0xEE));
        assert!(buf[32 + cap..].iter().all(|&b| b == 0xEE));
    }
}

#[test]
fn test_bit_flips_do_not_panic() {
    let src = sample();
    let packed = compress_to_vec(&src).unwrap();
    let mut dst = vec![0u8; src.len()];
    for i in 0..packed.len() {
        for bit in [0x01u8, 0x10, 0x80] {
            let mut bad = packed.clone();
            bad[i] ^= bit;
            let _ = decompress(&bad, &mut dst);
            let _ = decompress_unknown_size(&bad, &mut dst);
        }
    }
}

#[test]
fn test_frame_errors_chain_codec_errors() {
    let mut packed = compress_frame(&sample(), &FrameOptions::default()).unwrap();
    // First payload byte is the first token; make its literal run absurd.
    packed[16 + 8] = 0xF0;
    packed[16 + 9] = 0xFF;
    let err = decompress_frame(&packed).unwrap_err();
    assert!(
        matches!(err, FrameError::Decompress(_) | FrameError::SizeMismatch { .. } | FrameError::ChecksumMismatch { .. }),
        "{err}"
    );
}
