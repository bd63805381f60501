// Integration tests for block::types: byte-access primitives, copy helpers,
// and match-length counting.

use lz4lite::block::types::{
    byte_copy, count, read_le16, read_le32, read_le64, wild_copy8, write_le16, write_le32,
    COPYLENGTH, LASTLITERALS, MAX_DISTANCE, MFLIMIT, MINMATCH, MIN_LENGTH, NARROW_TABLE_LIMIT,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_constants() {
    assert_eq!(MINMATCH, 4);
    assert_eq!(COPYLENGTH, 8);
    assert_eq!(LASTLITERALS, 5);
    assert_eq!(MFLIMIT, 12);
    assert_eq!(MIN_LENGTH, 13);
    assert_eq!(MAX_DISTANCE, 65_535);
    assert_eq!(NARROW_TABLE_LIMIT, 65_536);
}

// ─────────────────────────────────────────────────────────────────────────────
// Unaligned little-endian access
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn unaligned_reads_at_every_offset() {
    let buf: Vec<u8> = (0u8..32).collect();
    for off in 0..16 {
        let p = unsafe { buf.as_ptr().add(off) };
        let v16 = unsafe { read_le16(p) };
        let v32 = unsafe { read_le32(p) };
        let v64 = unsafe { read_le64(p) };
        assert_eq!(v16, u16::from_le_bytes(buf[off..off + 2].try_into().unwrap()));
        assert_eq!(v32, u32::from_le_bytes(buf[off..off + 4].try_into().unwrap()));
        assert_eq!(v64, u64::from_le_bytes(buf[off..off + 8].try_into().unwrap()));
    }
}

#[test]
fn unaligned_writes() {
    let mut buf = [0u8; 9];
    unsafe {
        write_le16(buf.as_mut_ptr().add(1), 0xBEEF);
        write_le32(buf.as_mut_ptr().add(3), 0x0102_0304);
    }
    assert_eq!(buf, [0, 0xEF, 0xBE, 0x04, 0x03, 0x02, 0x01, 0, 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy helpers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn wild_copy_covers_requested_range() {
    let src: Vec<u8> = (100u8..140).collect();
    let mut dst = vec![0u8; 40];
    unsafe {
        let end = dst.as_mut_ptr().add(19);
        wild_copy8(dst.as_mut_ptr(), src.as_ptr(), end);
    }
    // 19 bytes requested, rounded up to three 8-byte chunks.
    assert_eq!(&dst[..24], &src[..24]);
    assert!(dst[24..].iter().all(|&b| b == 0));
}

#[test]
fn byte_copy_replicates_period() {
    let mut buf = vec![0u8; 20];
    buf[..3].copy_from_slice(b"xyz");
    unsafe {
        let base = buf.as_mut_ptr();
        byte_copy(base.add(3), base, 17);
    }
    assert_eq!(&buf[..], b"xyzxyzxyzxyzxyzxyzxy");
}

// ─────────────────────────────────────────────────────────────────────────────
// count
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn count_finds_first_difference_at_every_length() {
    for common in 0..40usize {
        let a = vec![7u8; 48];
        let mut b = vec![7u8; 48];
        b[common] = 8;
        let n = unsafe { count(b.as_ptr(), a.as_ptr(), b.as_ptr().add(48)) };
        assert_eq!(n, common, "common prefix {common}");
    }
}

#[test]
fn count_never_passes_limit() {
    let a = vec![1u8; 64];
    let b = vec![1u8; 64];
    for limit in 0..30usize {
        let n = unsafe { count(b.as_ptr(), a.as_ptr(), b.as_ptr().add(limit)) };
        assert_eq!(n, limit);
    }
}
