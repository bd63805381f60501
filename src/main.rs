//! Binary entry point for the `lz4lite` command-line tool.
//!
//! 1. `env_logger` is installed (default filter `warn`, `RUST_LOG` overrides).
//! 2. [`Cli::parse`] reads flags; `--help`/`--version` exit here.
//! 3. [`ParsedArgs::resolve`] layers flags over the `LZ4LITE_*` environment.
//! 4. [`execute`] runs the operation; any error is printed with its cause
//!    chain and the process exits with status 1.

use std::process::ExitCode;

use clap::Parser;

use lz4lite::cli::args::{Cli, ParsedArgs};
use lz4lite::cli::constants::{set_display_level, COMPRESSOR_NAME};
use lz4lite::cli::run::execute;
use lz4lite::config::Settings;

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let args = ParsedArgs::resolve(cli, Settings::from_env())?;
    set_display_level(args.display_level);

    lz4lite::displaylevel!(
        3,
        "*** {} v{} {}-bit ***\n",
        COMPRESSOR_NAME,
        lz4lite::VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    );
    lz4lite::displaylevel!(
        4,
        "block size {} KiB, checksum {}\n",
        args.options.effective_block_size() >> 10,
        if args.options.checksum { "on" } else { "off" }
    );

    execute(&args)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            lz4lite::displaylevel!(1, "{COMPRESSOR_NAME}: {e:#}\n");
            ExitCode::FAILURE
        }
    }
}
