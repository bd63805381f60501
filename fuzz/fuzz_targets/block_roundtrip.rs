#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let compressed = match lz4lite::compress_to_vec(data) {
        Ok(v) => v,
        // Only oversized inputs are refused.
        Err(_) => return,
    };
    assert!(compressed.len() <= lz4lite::compress_bound(data.len()));

    let recovered = lz4lite::decompress_to_vec(&compressed, data.len())
        .expect("self-compressed block must decode");
    assert_eq!(recovered, data, "block round-trip mismatch ({} compressed bytes)", compressed.len());

    // The bounded decoder must agree given spare room.
    let bounded = lz4lite::block::decompress_to_vec_bounded(&compressed, data.len() + 64)
        .expect("bounded decode of self-compressed block");
    assert_eq!(bounded, data);
});
