// Integration tests for cli/run.rs: file handling around the container codec.

use std::fs;

use lz4lite::cli::args::{Output, ParsedArgs};
use lz4lite::cli::op_mode::OpMode;
use lz4lite::cli::run::execute;
use lz4lite::config::Settings;

fn resolve(argv: &[&str]) -> ParsedArgs {
    let full = std::iter::once("lz4lite").chain(argv.iter().copied());
    ParsedArgs::parse_from(full, Settings::default()).unwrap()
}

#[test]
fn compress_rm_removes_source() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("victim.txt");
    fs::write(&src, b"to be removed to be removed to be removed").unwrap();
    let src_s = src.to_string_lossy().into_owned();

    let args = resolve(&["--rm", "-qqq", &src_s]);
    assert_eq!(args.output, Output::File(format!("{src_s}.lzl")));
    assert_eq!(args.display_level, 0);
    execute(&args).unwrap();
    assert!(!src.exists());
    assert!(dir.path().join("victim.txt.lzl").exists());
}

#[test]
fn decompress_missing_input_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.lzl").to_string_lossy().into_owned();
    let args = resolve(&["-d", &missing]);
    let err = execute(&args).unwrap_err();
    assert!(format!("{err:#}").contains("cannot open"));
    assert!(!dir.path().join("nope").exists());
}

#[test]
fn test_mode_reports_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.lzl");
    fs::write(&bad, b"definitely not a container").unwrap();
    let args = resolve(&["-t", &bad.to_string_lossy()]);
    assert_eq!(args.op_mode, OpMode::Test);
    let err = execute(&args).unwrap_err();
    assert!(format!("{err:#}").contains("integrity check failed"));
}
