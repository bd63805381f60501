// Integration tests for cli/op_mode.rs: output-name derivation.

use lz4lite::cli::constants::LZL_EXTENSION;
use lz4lite::cli::op_mode::{default_output_name, OpMode};

#[test]
fn compress_then_decompress_name_is_identity() {
    for name in ["a", "dir/file.tar", "weird name.bin"] {
        let packed = default_output_name(name, OpMode::Compress).unwrap();
        assert!(packed.ends_with(LZL_EXTENSION));
        assert_eq!(default_output_name(&packed, OpMode::Decompress).as_deref(), Some(name));
    }
}

#[test]
fn test_mode_has_no_output_name() {
    assert_eq!(default_output_name("a.lzl", OpMode::Test), None);
}
