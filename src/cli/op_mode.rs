//! Operation mode selection.

use crate::cli::constants::LZL_EXTENSION;

/// What the CLI should do with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Wrap the input in a container.
    Compress,
    /// Unwrap a container.
    Decompress,
    /// Decode a container and discard the output.
    Test,
}

/// Output file name for `input` under `mode`, or `None` when it cannot be
/// derived (decompressing a file without the `.lzl` suffix).
pub fn default_output_name(input: &str, mode: OpMode) -> Option<String> {
    match mode {
        OpMode::Compress => Some(format!("{input}{LZL_EXTENSION}")),
        OpMode::Decompress => input
            .strip_suffix(LZL_EXTENSION)
            .filter(|stem| !stem.is_empty())
            .map(str::to_owned),
        OpMode::Test => None,
    }
}
