//! Command-line interface for the `lz4lite` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, file-name conventions, and the `DISPLAY_LEVEL` atomic behind `display!`/`displaylevel!`. |
//! | [`op_mode`]   | `OpMode` and default output-name derivation. |
//! | [`args`]      | `clap` flag declarations and resolution into `ParsedArgs`. |
//! | [`run`]       | Opens files or standard streams and drives the container codec. |
//!
//! Typical call sequence: `Cli::parse` → `ParsedArgs::resolve` → `run::execute`.

pub mod constants;
pub mod op_mode;
pub mod args;
pub mod run;
