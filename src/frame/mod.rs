//! Length-prefixed container around independently compressed blocks.
//!
//! | Submodule      | Responsibility |
//! |----------------|----------------|
//! | [`types`]      | Format constants, [`FrameOptions`], [`FrameStats`], [`FrameError`]. |
//! | [`header`]     | [`FrameHeader`] encoding and validation. |
//! | [`compress`]   | Block-splitting encoder over slices or `Read`. |
//! | [`decompress`] | Validating decoder over slices or `Read`. |

pub mod compress;
pub mod decompress;
pub mod header;
pub mod types;

pub use compress::{compress_frame, compress_stream, frame_bound};
pub use decompress::{decompress_frame, decompress_stream, verify_stream};
pub use header::FrameHeader;
pub use types::{FrameError, FrameOptions, FrameStats, HEADER_SIZE, MAGIC};
