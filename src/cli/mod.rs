//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod palette;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::codec::MAX_WIDTH;
use crate::image_io::MAX_SCALE;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// zxtex - convert sprites between images and 16-colour hex text
#[derive(Parser)]
#[command(name = "zxtex")]
#[command(
    about = "Convert sprites between raster images (PNG, GIF, BMP, JPEG) and 16-colour hex text grids"
)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub convert: ConvertArgs,

    /// Log conversion details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the default conversion command
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Image file, sprite text file (.txt, .hex), or a literal hex string
    pub input: Option<String>,

    /// Write image -> text output as one raw line without header
    #[arg(long)]
    pub raw: bool,

    /// Grid width for text -> image (required for literal hex strings)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=MAX_WIDTH as i64))]
    pub width: Option<u32>,

    /// Output file.
    /// Image -> text: defaults to stdout.
    /// Text -> image: defaults to the header file name with .png, else out.png
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Colour to treat as transparent (e.g. "#FF00FF" or "255,0,255")
    #[arg(long, value_name = "COLOR")]
    pub transparent_color: Option<String>,

    /// Palette index (0-15) whose nearest matches become transparent
    #[arg(long, value_name = "INDEX", value_parser = clap::value_parser!(u8).range(0..=15))]
    pub transparent_index: Option<u8>,

    /// Scale PNG output by integer factor (1-64)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
    pub scale: Option<u32>,

    /// Use this zxtex.toml instead of searching for one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the 16-colour sprite palette
    Palette {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Set up `tracing` output on stderr so stdout stays clean for piped text.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "zxtex=debug" } else { "zxtex=warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).without_time())
        .try_init();
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Palette { json }) => palette::run_palette(json),
        None => convert::run_convert(cli.convert),
    }
}
