#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics and out-of-bounds accesses are not.
    let large = data.len().saturating_mul(255).min(1 << 20);
    for cap in [0usize, 16, 4096, data.len(), large] {
        let mut dst = vec![0u8; cap];
        if let Ok(n) = lz4lite::decompress_unknown_size(data, &mut dst) {
            assert!(n <= cap);
        }
        if let Ok(n) = lz4lite::decompress(data, &mut dst) {
            assert!(n <= data.len());
        }
    }
});
