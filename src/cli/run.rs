//! Operation dispatch: open the input, open the output, run the container
//! codec between them, and report.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::args::{Output, ParsedArgs};
use crate::cli::op_mode::OpMode;
use crate::displaylevel;
use crate::frame::{compress_stream, decompress_stream, verify_stream, FrameStats};

fn open_input(input: Option<&str>) -> Result<Box<dyn Read>> {
    match input {
        None => Ok(Box::new(io::stdin().lock())),
        Some(name) => {
            let file = File::open(name).with_context(|| format!("cannot open {name}"))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

fn open_output(output: &Output, force: bool) -> Result<Box<dyn Write>> {
    match output {
        Output::Stdout => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        Output::Discard => Ok(Box::new(io::sink())),
        Output::File(name) => {
            if !force && Path::new(name).exists() {
                bail!("{name} already exists; use -f to overwrite");
            }
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(name)
                .with_context(|| format!("cannot create {name}"))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

/// Run the operation described by `args`.
pub fn execute(args: &ParsedArgs) -> Result<FrameStats> {
    let source = args.input.as_deref().unwrap_or("stdin");

    if args.op_mode == OpMode::Compress
        && args.output == Output::Stdout
        && io::stdout().is_terminal()
    {
        bail!("refusing to write compressed data to a terminal");
    }

    let mut reader = open_input(args.input.as_deref())?;
    let mut writer = open_output(&args.output, args.force)?;

    let stats = match args.op_mode {
        OpMode::Compress => compress_stream(&mut reader, &mut writer, &args.options)
            .with_context(|| format!("{source}: compression failed"))?,
        OpMode::Decompress => decompress_stream(&mut reader, &mut writer)
            .with_context(|| format!("{source}: decompression failed"))?,
        OpMode::Test => verify_stream(&mut reader)
            .with_context(|| format!("{source}: integrity check failed"))?,
    };
    writer.flush()?;
    drop(writer);

    match args.op_mode {
        OpMode::Compress => {
            let ratio = if stats.content_size == 0 {
                0.0
            } else {
                stats.frame_size as f64 * 100.0 / stats.content_size as f64
            };
            displaylevel!(
                2,
                "{source}: {} -> {} bytes ({ratio:.2}%)\n",
                stats.content_size,
                stats.frame_size
            );
        }
        OpMode::Decompress => {
            displaylevel!(2, "{source}: decoded {} bytes\n", stats.content_size);
        }
        OpMode::Test => {
            displaylevel!(2, "{source}: OK ({} bytes)\n", stats.content_size);
        }
    }
    displaylevel!(4, "{source}: {} block(s)\n", stats.blocks);

    if args.remove_source {
        if let Some(name) = args.input.as_deref() {
            fs::remove_file(name).with_context(|| format!("cannot remove {name}"))?;
            displaylevel!(3, "removed {name}\n");
        }
    }

    Ok(stats)
}
