//! E2E Test Suite: Container
//!
//! Whole-file style round-trips through the in-memory and streaming
//! container APIs, including block-size boundaries and mixed raw and
//! compressed blocks.

use lz4lite::frame::{
    compress_frame, compress_stream, decompress_frame, decompress_stream, FrameHeader,
    FrameOptions,
};

fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed >> 7) as u8
        })
        .collect()
}

#[test]
fn test_block_size_boundaries() {
    let opts = FrameOptions::default().with_block_size(64 * 1024);
    let bs = opts.effective_block_size();
    for len in [bs - 1, bs, bs + 1, 3 * bs] {
        let data: Vec<u8> = (0..len).map(|i| (i % 13) as u8).collect();
        let packed = compress_frame(&data, &opts).unwrap();
        assert_eq!(decompress_frame(&packed).unwrap(), data, "len {len}");
    }
}

#[test]
fn test_mixed_raw_and_compressed_blocks() {
    let opts = FrameOptions::default().with_block_size(64 * 1024);
    let mut data = noise(64 * 1024, 42);
    data.extend(std::iter::repeat(b'x').take(64 * 1024));
    data.extend(noise(10_000, 7));

    let packed = compress_frame(&data, &opts).unwrap();
    // Block 0 is noise and must be stored raw.
    let stored0 = u32::from_le_bytes(packed[20..24].try_into().unwrap());
    assert_ne!(stored0 & 0x8000_0000, 0);
    assert_eq!(decompress_frame(&packed).unwrap(), data);
}

#[test]
fn test_stream_and_oneshot_agree_on_content() {
    let data = noise(500_000, 99)
        .into_iter()
        .map(|b| b & 0x0F)
        .collect::<Vec<u8>>();
    let opts = FrameOptions::default().with_block_size(128 * 1024);

    let oneshot = compress_frame(&data, &opts).unwrap();
    let mut streamed = Vec::new();
    compress_stream(&mut &data[..], &mut streamed, &opts).unwrap();

    // Only the header differs: the streamed one carries no content size.
    assert_eq!(&oneshot[16..], &streamed[16..]);
    assert_eq!(FrameHeader::parse(&streamed).unwrap().content_size, None);

    let mut out = Vec::new();
    decompress_stream(&mut &streamed[..], &mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_large_default_block() {
    let data: Vec<u8> = (0..6_000_000u32).map(|i| (i % 251) as u8 ^ (i >> 16) as u8).collect();
    let packed = compress_frame(&data, &FrameOptions::default()).unwrap();
    assert!(packed.len() < data.len() / 2);
    assert_eq!(decompress_frame(&packed).unwrap(), data);
}
