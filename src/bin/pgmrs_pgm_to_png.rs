// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pgm_rs as pgmrs;

use clap::{Parser, ValueEnum};
use std::{error::Error, path::PathBuf, process};

use pgmrs::core::pgm::read::{ChannelMode, Config};
use pgmrs::misc::helper;

/// Convert a plain text PGM (P2) file into a png image.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// PGM file to read.
    #[arg(default_value = "output/converted.pgm")]
    input: PathBuf,
    /// Png file to create.
    #[arg(default_value = "output/converted.png")]
    output: PathBuf,
    /// Layout of the samples in the PGM body.
    #[arg(long, value_enum, default_value_t = Mode::Rgb)]
    mode: Mode,
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// One gray sample per pixel, saved as a gray png.
    Gray,
    /// Three samples per pixel.
    Rgb,
    /// One gray sample per pixel, saved as an RGB png.
    GrayAsRgb,
}

impl From<Mode> for ChannelMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Gray => ChannelMode::Grayscale,
            Mode::Rgb => ChannelMode::RgbTriplet,
            Mode::GrayAsRgb => ChannelMode::GrayscaleAsRgb,
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(error) = helper::init_logger(args.verbose) {
        eprintln!("{}", error);
    }
    if let Err(error) = my_run(&args) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn my_run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = Config {
        channel_mode: args.mode.into(),
    };
    let pgm = config.read_file(&args.input)?;
    log::info!(
        "Read {} ({}x{}, max value {})",
        args.input.display(),
        pgm.pixels.width(),
        pgm.pixels.height(),
        pgm.max_value
    );
    pgm.pixels.write_png(&args.output)?;
    Ok(())
}
