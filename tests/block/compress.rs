// Integration tests for block::compress: sizing contract, variant
// selection, token layout, and round-trips at format boundaries.

use lz4lite::block::{
    compress, compress_bound, compress_to_vec, compress_with_table, decompress, select_variant,
    CompressError, EncoderVariant, NarrowTable, WideTable, MAX_INPUT_SIZE,
};

fn pseudo_random(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed >> 24) as u8
        })
        .collect()
}

fn text(len: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn round_trip(input: &[u8]) -> Vec<u8> {
    let packed = compress_to_vec(input).expect("compress");
    assert!(packed.len() <= compress_bound(input.len()));
    let mut out = vec![0u8; input.len()];
    let consumed = decompress(&packed, &mut out).expect("decompress");
    assert_eq!(consumed, packed.len());
    assert_eq!(out, input);
    packed
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bound_is_five_percent_plus_floor() {
    assert_eq!(compress_bound(0), 8);
    assert_eq!(compress_bound(100), 108);
    assert_eq!(compress_bound(1_000_000), 1_050_000);
    assert_eq!(compress_bound(MAX_INPUT_SIZE), MAX_INPUT_SIZE + MAX_INPUT_SIZE.div_ceil(20));
}

#[test]
fn random_input_fits_bound() {
    for (len, seed) in [(1usize, 1u32), (13, 2), (999, 3), (70_000, 4), (300_000, 5)] {
        round_trip(&pseudo_random(len, seed));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn destination_below_bound_is_rejected() {
    let src = text(1000);
    let mut dst = vec![0u8; compress_bound(1000) - 1];
    assert_eq!(
        compress(&src, &mut dst),
        Err(CompressError::DestinationTooSmall { required: 1050, available: 1049 })
    );
}

#[test]
fn narrow_table_refuses_64k() {
    let src = text(64 * 1024);
    let mut dst = vec![0u8; compress_bound(src.len())];
    assert!(matches!(
        compress_with_table(&mut NarrowTable::new(), &src, &mut dst),
        Err(CompressError::InvalidArgument(_))
    ));
    let n = compress_with_table(&mut WideTable::new(), &src, &mut dst).unwrap();
    let mut out = vec![0u8; src.len()];
    decompress(&dst[..n], &mut out).unwrap();
    assert_eq!(out, src);
}

#[test]
fn error_messages_are_descriptive() {
    let e = CompressError::DestinationTooSmall { required: 10, available: 3 };
    let msg = e.to_string();
    assert!(msg.contains("10") && msg.contains('3'), "{msg}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Variant selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn variant_threshold_is_64k() {
    assert_eq!(select_variant(0), EncoderVariant::Compact);
    assert_eq!(select_variant(65_535), EncoderVariant::Compact);
    assert_eq!(select_variant(65_536), EncoderVariant::General);
}

#[test]
fn both_tables_produce_decodable_output() {
    let src = text(20_000);
    let mut a = vec![0u8; compress_bound(src.len())];
    let mut b = vec![0u8; compress_bound(src.len())];
    let na = compress_with_table(&mut NarrowTable::new(), &src, &mut a).unwrap();
    let nb = compress_with_table(&mut WideTable::new(), &src, &mut b).unwrap();
    for packed in [&a[..na], &b[..nb]] {
        let mut out = vec![0u8; src.len()];
        decompress(packed, &mut out).unwrap();
        assert_eq!(out, src);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exact encodings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_single_zero_token() {
    assert_eq!(compress_to_vec(b"").unwrap(), vec![0x00]);
}

#[test]
fn three_bytes_are_one_literal_run() {
    assert_eq!(compress_to_vec(b"abc").unwrap(), vec![0x30, b'a', b'b', b'c']);
}

#[test]
fn short_inputs_are_all_literals() {
    for len in [1usize, 4, 12] {
        let src = vec![b'q'; len];
        let packed = compress_to_vec(&src).unwrap();
        assert_eq!(packed[0], (len as u8) << 4);
        assert_eq!(&packed[1..], &src[..]);
    }
}

#[test]
fn fifteen_literals_take_one_extension_byte() {
    let mut fifteen = vec![0u8; 15];
    for (i, b) in fifteen.iter_mut().enumerate() {
        *b = (i * 37 + 11) as u8;
    }
    let packed = compress_to_vec(&fifteen).unwrap();
    assert_eq!(packed[0], 0xF0);
    assert_eq!(packed[1], 0);
    assert_eq!(&packed[2..], &fifteen[..]);
}

#[test]
fn long_run_is_one_match() {
    let packed = round_trip(&[b'A'; 32]);
    assert_eq!(packed, vec![0x1F, b'A', 0x01, 0x00, 7, 0x50, b'A', b'A', b'A', b'A', b'A']);
}

// ─────────────────────────────────────────────────────────────────────────────
// Boundary round-trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn boundary_lengths_round_trip() {
    for len in [0usize, 1, 3, 4, 12, 13, 14, 65_535, 65_536, 65_537] {
        round_trip(&text(len));
        round_trip(&pseudo_random(len, len as u32 + 1));
    }
}

#[test]
fn literal_run_extension_lengths_round_trip() {
    // Inputs this short and noisy encode as one literal run of their full
    // length, so the token and extension bytes are fully determined.
    let cases: [(usize, &[u8]); 4] = [
        (14, &[0xE0]),
        (15, &[0xF0, 0x00]),
        (15 + 255, &[0xF0, 0xFF, 0x00]),
        (15 + 255 + 255 + 7, &[0xF0, 0xFF, 0xFF, 0x07]),
    ];
    for (run, header) in cases {
        let src = pseudo_random(run, 77);
        let packed = round_trip(&src);
        assert_eq!(&packed[..header.len()], header, "run {run}");
        assert_eq!(&packed[header.len()..], &src[..], "run {run}");
    }
}

#[test]
fn distance_limit_is_respected() {
    // The same 1 KiB block repeated 70 000 bytes apart forces candidates
    // beyond MAX_DISTANCE.
    let block = pseudo_random(1024, 123);
    let mut src = block.clone();
    src.extend(pseudo_random(70_000, 321));
    src.extend_from_slice(&block);
    round_trip(&src);
}

#[test]
fn compressible_text_shrinks() {
    let src = text(100_000);
    let packed = round_trip(&src);
    assert!(packed.len() < src.len() / 10);
}
