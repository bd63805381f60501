#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics are not.
    let _ = lz4lite::frame::decompress_frame(data);

    let mut reader = data;
    let _ = lz4lite::frame::verify_stream(&mut reader);
});
