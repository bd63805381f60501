//! Command-line parsing (`clap` derive) and resolution into [`ParsedArgs`].
//!
//! Precedence, lowest to highest: compile-time defaults, `LZ4LITE_*`
//! environment variables ([`Settings`]), explicit flags.

use anyhow::{anyhow, bail, Result};
use clap::{ArgAction, Parser};

use crate::cli::constants::{LZL_EXTENSION, STDIO_MARK};
use crate::cli::op_mode::{default_output_name, OpMode};
use crate::config::{parse_block_size, Settings, BLOCK_SIZE_MAX, BLOCK_SIZE_MIN, DISPLAY_LEVEL_DEFAULT};
use crate::frame::FrameOptions;

/// Raw flags as declared on the command line.
#[derive(Debug, Parser)]
#[command(
    name = "lz4lite",
    version,
    about = "Compress or decompress files with the lz4lite container format"
)]
pub struct Cli {
    /// Compress (default)
    #[arg(short = 'z', long, conflicts_with_all = ["decompress", "test"])]
    pub compress: bool,

    /// Decompress
    #[arg(short = 'd', long, conflicts_with = "test")]
    pub decompress: bool,

    /// Test container integrity (decompress and discard)
    #[arg(short = 't', long)]
    pub test: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Write to standard output
    #[arg(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Keep the source file (default)
    #[arg(short = 'k', long)]
    pub keep: bool,

    /// Remove the source file after success
    #[arg(long = "rm", conflicts_with = "keep")]
    pub remove: bool,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Block size in bytes, optional K/M suffix (64K..64M)
    #[arg(short = 'B', long = "block-size", value_parser = block_size_arg)]
    pub block_size: Option<usize>,

    /// Do not append a content checksum
    #[arg(long)]
    pub no_checksum: bool,

    /// Input file, `-` for standard input
    pub input: Option<String>,

    /// Output file, `-` for standard output
    pub output: Option<String>,
}

fn block_size_arg(raw: &str) -> Result<usize, String> {
    parse_block_size(raw)
        .ok_or_else(|| format!("expected {BLOCK_SIZE_MIN}..={BLOCK_SIZE_MAX} bytes, got {raw:?}"))
}

/// Where decoded or encoded bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(String),
    Discard,
}

/// Fully resolved runtime options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub op_mode: OpMode,
    /// `None` reads standard input.
    pub input: Option<String>,
    pub output: Output,
    pub force: bool,
    pub remove_source: bool,
    pub display_level: u32,
    pub options: FrameOptions,
}

impl ParsedArgs {
    /// Parse `argv` (program name first) against the given settings.
    pub fn parse_from<I, T>(argv: I, settings: Settings) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(argv)?;
        Self::resolve(cli, settings)
    }

    /// Apply flag precedence and derive the output destination.
    pub fn resolve(cli: Cli, settings: Settings) -> Result<Self> {
        let op_mode = if cli.test {
            OpMode::Test
        } else if cli.decompress {
            OpMode::Decompress
        } else {
            OpMode::Compress
        };

        let display_level = (DISPLAY_LEVEL_DEFAULT + cli.verbose as u32)
            .saturating_sub(cli.quiet as u32)
            .min(4);

        let input = cli.input.filter(|name| name != STDIO_MARK);

        let output = if op_mode == OpMode::Test {
            Output::Discard
        } else if cli.stdout || cli.output.as_deref() == Some(STDIO_MARK) {
            Output::Stdout
        } else if let Some(name) = cli.output {
            Output::File(name)
        } else {
            match input.as_deref() {
                None => Output::Stdout,
                Some(name) => default_output_name(name, op_mode).map(Output::File).ok_or_else(|| {
                    anyhow!("cannot derive an output name for {name:?}: no {LZL_EXTENSION} suffix")
                })?,
            }
        };

        if cli.remove && input.is_none() {
            bail!("--rm needs a named input file");
        }

        let options = FrameOptions::default()
            .with_block_size(cli.block_size.unwrap_or(settings.block_size))
            .with_checksum(settings.checksum && !cli.no_checksum);

        Ok(Self {
            op_mode,
            input,
            output,
            force: cli.force,
            remove_source: cli.remove && !cli.keep,
            display_level,
            options,
        })
    }
}
