// Integration tests for the in-memory container API.

use lz4lite::frame::{
    compress_frame, decompress_frame, frame_bound, FrameError, FrameOptions, HEADER_SIZE,
};

fn corpus(len: usize) -> Vec<u8> {
    let words = ["block ", "frame ", "literal ", "match ", "offset ", "token "];
    let mut out = Vec::with_capacity(len);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(words[(i * 7 + i / 5) % words.len()].as_bytes());
        i += 1;
    }
    out.truncate(len);
    out
}

#[test]
fn round_trip_various_sizes() {
    let opts = FrameOptions::default().with_block_size(64 * 1024);
    for len in [0usize, 1, 13, 65_535, 65_536, 65_537, 200_000] {
        let data = corpus(len);
        let packed = compress_frame(&data, &opts).unwrap();
        assert!(packed.len() <= frame_bound(len, &opts));
        assert_eq!(decompress_frame(&packed).unwrap(), data, "len {len}");
    }
}

#[test]
fn checksum_can_be_disabled() {
    let data = corpus(10_000);
    let with = compress_frame(&data, &FrameOptions::default()).unwrap();
    let without = compress_frame(&data, &FrameOptions::default().with_checksum(false)).unwrap();
    assert_eq!(with.len(), without.len() + 4);
    assert_eq!(decompress_frame(&without).unwrap(), data);
}

#[test]
fn flipped_literal_fails_checksum() {
    // Incompressible content is stored raw, so flipping a payload byte
    // leaves the structure intact and only the checksum can notice.
    let mut seed = 0x9E37_79B9u32;
    let data: Vec<u8> = (0..5000)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed >> 11) as u8
        })
        .collect();
    let mut packed = compress_frame(&data, &FrameOptions::default()).unwrap();
    packed[HEADER_SIZE + 8 + 100] ^= 1;
    assert!(matches!(decompress_frame(&packed), Err(FrameError::ChecksumMismatch { .. })));
}

#[test]
fn wrong_magic_is_rejected() {
    let mut packed = compress_frame(b"hello", &FrameOptions::default()).unwrap();
    packed[0] = b'X';
    assert!(matches!(decompress_frame(&packed), Err(FrameError::BadMagic(_))));
}

#[test]
fn oversized_block_header_is_rejected() {
    let opts = FrameOptions::default().with_block_size(64 * 1024);
    let mut packed = compress_frame(&corpus(1000), &opts).unwrap();
    packed[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&(200_000u32).to_le_bytes());
    assert!(matches!(decompress_frame(&packed), Err(FrameError::BlockTooLarge { .. })));
}

#[test]
fn content_size_is_verified() {
    let mut packed = compress_frame(&corpus(1000), &FrameOptions::default()).unwrap();
    packed[8..16].copy_from_slice(&999u64.to_le_bytes());
    assert!(matches!(
        decompress_frame(&packed),
        Err(FrameError::SizeMismatch { expected: 999, actual: 1000 })
    ));
}
