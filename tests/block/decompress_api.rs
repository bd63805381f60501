// Integration tests for block::decompress_api: the two public decoders and
// their allocating wrappers.

use lz4lite::block::{
    compress_to_vec, decompress, decompress_to_vec, decompress_to_vec_bounded,
    decompress_unknown_size, DecompressError,
};

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i / 3) % 17) as u8 + b'a').collect()
}

#[test]
fn abc_round_trips_both_ways() {
    let packed = [0x30, b'a', b'b', b'c'];
    assert_eq!(decompress_to_vec(&packed, 3).unwrap(), b"abc");
    let mut big = [0u8; 32];
    assert_eq!(decompress_unknown_size(&packed, &mut big), Ok(3));
    assert_eq!(&big[..3], b"abc");
}

#[test]
fn thousand_byte_run() {
    let input = vec![0x5Au8; 1000];
    let packed = compress_to_vec(&input).unwrap();
    assert!(packed.len() < 20);
    assert_eq!(decompress_to_vec(&packed, 1000).unwrap(), input);
}

#[test]
fn exact_mode_returns_consumed_unknown_returns_produced() {
    let input = sample(10_000);
    let packed = compress_to_vec(&input).unwrap();

    let mut exact = vec![0u8; input.len()];
    assert_eq!(decompress(&packed, &mut exact), Ok(packed.len()));

    let mut roomy = vec![0u8; input.len() * 2];
    assert_eq!(decompress_unknown_size(&packed, &mut roomy), Ok(input.len()));
    assert_eq!(&roomy[..input.len()], &input[..]);
}

#[test]
fn bounded_wrapper_truncates_to_produced() {
    let input = sample(5000);
    let packed = compress_to_vec(&input).unwrap();
    let out = decompress_to_vec_bounded(&packed, 1 << 16).unwrap();
    assert_eq!(out, input);
}

#[test]
fn undersized_destination_is_overflow() {
    let input = sample(5000);
    let packed = compress_to_vec(&input).unwrap();
    for cap in [0usize, 1, 100, 4999] {
        assert!(matches!(
            decompress_to_vec_bounded(&packed, cap),
            Err(DecompressError::OutputOverflow { .. })
        ));
    }
}

#[test]
fn zero_offset_is_corruption() {
    let block = [0x10, b'x', 0x00, 0x00, 0x50, 1, 2, 3, 4, 5];
    assert!(matches!(
        decompress_to_vec(&block, 10),
        Err(DecompressError::ZeroOffset { .. })
    ));
}
