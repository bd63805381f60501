// e2e/cli_integration.rs: CLI integration tests
//
// Tests the `lz4lite` binary as a black-box CLI tool using std::process::Command.
// Covers compress/decompress dispatch, stdio piping, overwrite protection,
// test mode, environment overrides, and exit codes.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Locate the `lz4lite` binary produced by Cargo.
fn lz4lite_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_lz4lite") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("lz4lite");
    p
}

/// Create a TempDir containing a text file with ~4 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, lz4lite!\n".repeat(256);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let compressed = dir.path().join("output.lzl");
    let roundtrip = dir.path().join("roundtrip.txt");

    let status = Command::new(lz4lite_bin())
        .args(["-q", input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .expect("failed to run lz4lite compress");
    assert!(status.success(), "compress step should exit 0");
    assert!(fs::metadata(&compressed).unwrap().len() < original.len() as u64);

    let status = Command::new(lz4lite_bin())
        .args(["-q", "-d", compressed.to_str().unwrap(), roundtrip.to_str().unwrap()])
        .status()
        .expect("failed to run lz4lite decompress");
    assert!(status.success(), "decompress step should exit 0");

    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

// ── 2. Derived output names ──────────────────────────────────────────────────

#[test]
fn test_cli_default_output_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let status = Command::new(lz4lite_bin())
        .args(["-q", input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    let packed = dir.path().join("input.txt.lzl");
    assert!(packed.exists(), "INPUT.lzl should be created");
    assert!(input.exists(), "source is kept by default");

    fs::remove_file(&input).unwrap();
    let status = Command::new(lz4lite_bin())
        .args(["-q", "-d", packed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 3. --version / --help ────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(lz4lite_bin()).arg("--version").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains(env!("CARGO_PKG_VERSION")), "version output: {text}");
}

#[test]
fn test_cli_help_mentions_flags() {
    let output = Command::new(lz4lite_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for flag in ["--decompress", "--test", "--force", "--block-size", "--no-checksum"] {
        assert!(text.contains(flag), "help lacks {flag}");
    }
}

// ── 4. stdin → stdout piping ─────────────────────────────────────────────────

fn pipe(args: &[&str], input: &[u8]) -> std::process::Output {
    let mut child = Command::new(lz4lite_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_cli_stdin_stdout_roundtrip() {
    let data = b"piped through standard streams ".repeat(1000);
    let packed = pipe(&["-q"], &data);
    assert!(packed.status.success());
    assert_eq!(&packed.stdout[..4], b"LZL1");

    let restored = pipe(&["-q", "-d"], &packed.stdout);
    assert!(restored.status.success());
    assert_eq!(restored.stdout, data);
}

// ── 5. Overwrite protection ──────────────────────────────────────────────────

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let target = dir.path().join("exists.lzl");
    fs::write(&target, b"precious").unwrap();

    let output = Command::new(lz4lite_bin())
        .args([input.to_str().unwrap(), target.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(fs::read(&target).unwrap(), b"precious");

    let status = Command::new(lz4lite_bin())
        .args(["-q", "-f", input.to_str().unwrap(), target.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert_ne!(fs::read(&target).unwrap(), b"precious");
}

// ── 6. Test mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_test_mode() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("t.lzl");
    assert!(Command::new(lz4lite_bin())
        .args(["-q", input.to_str().unwrap(), packed.to_str().unwrap()])
        .status()
        .unwrap()
        .success());

    assert!(Command::new(lz4lite_bin())
        .args(["-q", "-t", packed.to_str().unwrap()])
        .status()
        .unwrap()
        .success());

    let mut bytes = fs::read(&packed).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&packed, &bytes).unwrap();
    let status = Command::new(lz4lite_bin())
        .args(["-qq", "-t", packed.to_str().unwrap()])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}

// ── 7. Environment overrides ─────────────────────────────────────────────────

#[test]
fn test_cli_env_disables_checksum() {
    let data = b"environment controlled ".repeat(100);
    let mut child = Command::new(lz4lite_bin())
        .arg("-q")
        .env("LZ4LITE_CHECKSUM", "0")
        .env("LZ4LITE_BLOCK_SIZE", "64K")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&data).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout[4] & 0x01, 0, "checksum flag should be clear");
    assert_eq!(out.stdout[6], 16, "block size log should be 16");
}

// ── 8. Bad usage ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_decompress_needs_suffix_or_output() {
    let (_dir, input) = make_temp_input();
    let output = Command::new(lz4lite_bin())
        .args(["-d", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_conflicting_modes() {
    let output = Command::new(lz4lite_bin()).args(["-d", "-t", "x"]).output().unwrap();
    assert!(!output.status.success());
}
