// Integration tests for block::match_finder: hashing, table semantics,
// and the reusable compression context.

use lz4lite::block::match_finder::{
    CompressContext, MatchTable, NarrowTable, WideTable, HASH_MULTIPLIER, NARROW_HASH_LOG,
    NARROW_TABLE_SLOTS, WIDE_HASH_LOG, WIDE_TABLE_SLOTS,
};
use lz4lite::block::{compress, compress_bound, compress_with_context};

#[test]
fn table_geometry() {
    assert_eq!(WIDE_HASH_LOG, 12);
    assert_eq!(NARROW_HASH_LOG, 13);
    assert_eq!(WIDE_TABLE_SLOTS, 4096);
    assert_eq!(NARROW_TABLE_SLOTS, 8192);
    assert!(WideTable::CHECK_DISTANCE);
    assert!(!NarrowTable::CHECK_DISTANCE);
}

#[test]
fn hash_is_multiplicative_top_bits() {
    let seq = 0x6162_6364u32;
    let expected = (seq.wrapping_mul(HASH_MULTIPLIER) >> (32 - WIDE_HASH_LOG)) as usize;
    assert_eq!(WideTable::hash(seq), expected);
    let expected = (seq.wrapping_mul(HASH_MULTIPLIER) >> (32 - NARROW_HASH_LOG)) as usize;
    assert_eq!(NarrowTable::hash(seq), expected);
}

#[test]
fn reset_clears_every_slot() {
    let mut t = WideTable::new();
    for h in 0..WIDE_TABLE_SLOTS {
        t.put(h, h + 1);
    }
    t.reset();
    assert!((0..WIDE_TABLE_SLOTS).all(|h| t.get(h) == 0));

    let mut n = NarrowTable::default();
    n.put(NARROW_TABLE_SLOTS - 1, 9);
    n.reset();
    assert_eq!(n.get(NARROW_TABLE_SLOTS - 1), 0);
}

#[test]
fn context_reuse_matches_fresh_call() {
    let mut ctx = CompressContext::new();
    let a: Vec<u8> = b"alpha beta gamma delta ".iter().copied().cycle().take(5000).collect();
    let b: Vec<u8> = (0..100_000u32).map(|i| ((i / 7) % 251) as u8).collect();

    for input in [&a, &b, &a] {
        let mut fresh = vec![0u8; compress_bound(input.len())];
        let mut reused = vec![0u8; compress_bound(input.len())];
        let n1 = compress(input, &mut fresh).unwrap();
        let n2 = compress_with_context(&mut ctx, input, &mut reused).unwrap();
        assert_eq!(&fresh[..n1], &reused[..n2]);
    }
}

#[test]
fn context_debug_is_compact() {
    let text = format!("{:?}", CompressContext::default());
    assert!(text.starts_with("CompressContext"));
}
