#![no_main]
use libfuzzer_sys::fuzz_target;
use lz4lite::frame::{compress_frame, decompress_frame, FrameOptions};

fuzz_target!(|data: &[u8]| {
    // Small blocks so multi-block containers show up with short inputs.
    let checksum = data.first().is_some_and(|b| b & 1 == 0);
    let opts = FrameOptions::default().with_block_size(64 * 1024).with_checksum(checksum);

    let compressed = compress_frame(data, &opts).expect("container compression");
    let recovered = decompress_frame(&compressed).unwrap_or_else(|e| {
        panic!("self-compressed container failed to decode: {e} ({} bytes in)", data.len())
    });
    assert_eq!(recovered, data);
});
