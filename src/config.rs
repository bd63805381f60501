// config.rs: Compile-time defaults and environment overrides.
//
// The CLI starts from these constants, layers the LZ4LITE_* environment
// variables on top, then applies explicit flags last.

use crate::block::types::{KB, MB};

// Default container block size (4 MiB).
// Can be overridden by LZ4LITE_BLOCK_SIZE or the -B command-line flag.
pub const BLOCK_SIZE_DEFAULT: usize = 4 * MB;

// Accepted block-size range.  Requested sizes are rounded up to a power of two.
pub const BLOCK_SIZE_MIN: usize = 64 * KB;
pub const BLOCK_SIZE_MAX: usize = 64 * MB;

// Whether a content checksum is appended to each container.
// Can be overridden by LZ4LITE_CHECKSUM=0/1 or --no-checksum.
pub const CHECKSUM_DEFAULT: bool = true;

// 0 = silent, 1 = errors, 2 = normal, 3 = details, 4 = verbose.
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

pub const ENV_BLOCK_SIZE: &str = "LZ4LITE_BLOCK_SIZE";
pub const ENV_CHECKSUM: &str = "LZ4LITE_CHECKSUM";

/// Settings resolved from defaults and the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub block_size: usize,
    pub checksum: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { block_size: BLOCK_SIZE_DEFAULT, checksum: CHECKSUM_DEFAULT }
    }
}

impl Settings {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.  Unparsable or
    /// out-of-range values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(ENV_BLOCK_SIZE) {
            match parse_block_size(&raw) {
                Some(size) => settings.block_size = size,
                None => log::warn!("ignoring {ENV_BLOCK_SIZE}={raw:?}: expected {BLOCK_SIZE_MIN}..={BLOCK_SIZE_MAX} bytes"),
            }
        }

        if let Some(raw) = lookup(ENV_CHECKSUM) {
            match raw.trim() {
                "0" => settings.checksum = false,
                "1" => settings.checksum = true,
                _ => log::warn!("ignoring {ENV_CHECKSUM}={raw:?}: expected 0 or 1"),
            }
        }

        settings
    }
}

/// Parse a byte count with an optional `K`/`M` suffix (binary units) and
/// check it against the accepted range.
pub fn parse_block_size(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.as_bytes().last()? {
        b'K' | b'k' => (&raw[..raw.len() - 1], KB),
        b'M' | b'm' => (&raw[..raw.len() - 1], MB),
        _ => (raw, 1),
    };
    let size = digits.parse::<usize>().ok()?.checked_mul(multiplier)?;
    (BLOCK_SIZE_MIN..=BLOCK_SIZE_MAX).contains(&size).then_some(size)
}
