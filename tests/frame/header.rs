// Integration tests for frame::header: fixed layout and validation.

use lz4lite::frame::types::{FLAG_CONTENT_CHECKSUM, FLAG_CONTENT_SIZE};
use lz4lite::frame::{FrameError, FrameHeader, HEADER_SIZE, MAGIC};

#[test]
fn header_is_sixteen_bytes() {
    let h = FrameHeader { checksum: false, block_size_log: 20, content_size: None };
    let bytes = h.to_bytes();
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(u32::from_le_bytes(bytes[..4].try_into().unwrap()), MAGIC);
    assert_eq!(bytes[4], 0);
    assert_eq!(&bytes[8..], &[0u8; 8]);
}

#[test]
fn write_to_matches_to_bytes() {
    let h = FrameHeader { checksum: true, block_size_log: 16, content_size: Some(7) };
    let mut out = Vec::new();
    h.write_to(&mut out).unwrap();
    assert_eq!(out, h.to_bytes());
    assert_eq!(out[4], FLAG_CONTENT_CHECKSUM | FLAG_CONTENT_SIZE);
    assert_eq!(FrameHeader::read_from(&mut &out[..]).unwrap(), h);
}

#[test]
fn reserved_bytes_must_be_zero() {
    let mut bytes =
        FrameHeader { checksum: true, block_size_log: 22, content_size: Some(1) }.to_bytes();
    bytes[5] = 1;
    assert!(matches!(FrameHeader::parse(&bytes), Err(FrameError::UnsupportedFlags(_))));
}

#[test]
fn block_size_log_range() {
    for log in [15u8, 27] {
        let mut bytes =
            FrameHeader { checksum: false, block_size_log: 16, content_size: None }.to_bytes();
        bytes[6] = log;
        assert!(matches!(FrameHeader::parse(&bytes), Err(FrameError::BadBlockSize(l)) if l == log));
    }
}

#[test]
fn short_header_is_truncated() {
    assert!(matches!(FrameHeader::read_from(&mut &b"LZL1"[..]), Err(FrameError::Truncated)));
}
