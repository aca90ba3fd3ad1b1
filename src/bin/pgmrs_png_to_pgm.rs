// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pgm_rs as pgmrs;

use clap::Parser;
use std::{
    error::Error,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use pgmrs::core::pgm::write;
use pgmrs::misc::{helper, selection};

/// Name of the gray copy of the chosen image, in the output directory.
const GRAY_PNG: &str = "result_gray.png";
/// Name of the PGM document, in the output directory.
const PGM: &str = "original.pgm";

/// Convert a png image into a gray png image and a plain text PGM (P2) file.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Directory listing the png images to choose from.
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,
    /// Directory receiving result_gray.png and original.pgm.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
    /// Convert this image instead of asking for one.
    #[arg(long)]
    image: Option<PathBuf>,
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
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
    let image_path = match &args.image {
        Some(path) => path.clone(),
        None => prompt_image(&args.images_dir)?,
    };

    // Load the image as 8 bits gray.
    let img = helper::read_luma(&image_path)?;
    log::info!("Loaded {} ({}x{})", image_path.display(), img.ncols(), img.nrows());

    // Save both the gray png and the PGM document.
    fs::create_dir_all(&args.output_dir)?;
    helper::write_png_gray(args.output_dir.join(GRAY_PNG), &img)?;
    write::write_gray_file(&img, args.output_dir.join(PGM))?;
    Ok(())
}

/// Print the available images and read the user choice on stdin.
fn prompt_image(images_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let images = selection::list_png(images_dir)?;
    println!("Choose an image to convert:");
    print!("{}", selection::menu(&images));
    print!("Enter the number of the image: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let chosen = selection::choose(&images, &answer)?;
    Ok(chosen.clone())
}
