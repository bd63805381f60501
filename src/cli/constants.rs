// cli/constants.rs: Program identity, file-name conventions, and the
// display-level global behind the display macros.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::DISPLAY_LEVEL_DEFAULT;

pub const COMPRESSOR_NAME: &str = "lz4lite";
pub const LZL_EXTENSION: &str = ".lzl";

/// Pseudo file name selecting standard input or output.
pub const STDIO_MARK: &str = "-";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal; 3 = details; 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DISPLAY_LEVEL_DEFAULT);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            $crate::display!($($arg)*);
        }
    };
}
