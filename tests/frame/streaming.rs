// Integration tests for the Read/Write container API.

use std::io::{self, Read};

use lz4lite::frame::{
    compress_frame, compress_stream, decompress_stream, verify_stream, FrameHeader, FrameOptions,
};

/// Reader that hands out at most `chunk` bytes per call.
struct Trickle<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn data(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i % 97) ^ (i / 1000)) as u8).collect()
}

#[test]
fn stream_round_trip_with_short_reads() {
    let input = data(300_000);
    let opts = FrameOptions::default().with_block_size(64 * 1024);

    let mut packed = Vec::new();
    let stats = compress_stream(&mut Trickle { data: &input, chunk: 1000 }, &mut packed, &opts).unwrap();
    assert_eq!(stats.content_size, input.len() as u64);
    assert_eq!(stats.frame_size, packed.len() as u64);
    assert_eq!(stats.blocks, 5);

    let mut out = Vec::new();
    let dstats = decompress_stream(&mut Trickle { data: &packed, chunk: 333 }, &mut out).unwrap();
    assert_eq!(out, input);
    assert_eq!(dstats, stats);
}

#[test]
fn streamed_header_leaves_size_unset() {
    let mut packed = Vec::new();
    compress_stream(&mut &b"streamed"[..], &mut packed, &FrameOptions::default()).unwrap();
    let header = FrameHeader::parse(&packed).unwrap();
    assert_eq!(header.content_size, None);

    let oneshot = compress_frame(b"streamed", &FrameOptions::default()).unwrap();
    assert_eq!(FrameHeader::parse(&oneshot).unwrap().content_size, Some(8));
}

#[test]
fn verify_accepts_valid_and_rejects_truncated() {
    let packed = compress_frame(&data(50_000), &FrameOptions::default()).unwrap();
    assert!(verify_stream(&mut &packed[..]).is_ok());
    for cut in [0, 10, 16, 20, packed.len() / 2, packed.len() - 1] {
        assert!(verify_stream(&mut &packed[..cut]).is_err(), "cut at {cut}");
    }
}
