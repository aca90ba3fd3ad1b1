// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Miscellaneous helper functions that didn't fit elsewhere.

use log::Level;
use std::{fs::File, io::BufWriter, path::Path};

use crate::misc::interop;
use crate::misc::type_aliases::{GrayGrid, RgbGrid};

/// Read an image file of any supported format and convert it to 8 bits gray.
pub fn read_luma<P: AsRef<Path>>(file_path: P) -> Result<GrayGrid, image::ImageError> {
    let img = image::open(file_path)?;
    Ok(interop::matrix_from_image(img.to_luma8()))
}

/// Write a gray grid as an 8 bits gray png image.
pub fn write_png_gray<P: AsRef<Path>>(
    file_path: P,
    mat: &GrayGrid,
) -> Result<(), png::EncodingError> {
    let img = interop::image_from_matrix(mat);
    let (width, height) = img.dimensions();
    write_png(file_path, width, height, png::ColorType::Grayscale, img.as_raw())
}

/// Write an RGB grid as an 8 bits RGB png image.
pub fn write_png_rgb<P: AsRef<Path>>(
    file_path: P,
    mat: &RgbGrid,
) -> Result<(), png::EncodingError> {
    let img = interop::rgb_from_matrix(mat);
    let (width, height) = img.dimensions();
    write_png(file_path, width, height, png::ColorType::Rgb, img.as_raw())
}

fn write_png<P: AsRef<Path>>(
    file_path: P,
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<(), png::EncodingError> {
    let img_file = File::create(&file_path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(img_file), width, height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;
    writer.finish()?;
    log::info!("Wrote {}x{} png image to {}", width, height, file_path.as_ref().display());
    Ok(())
}

/// Log level for a number of `-v` flags on the command line, warnings by default.
pub fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Initialize the logger of the command line programs.
pub fn init_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let level = log_level(verbosity);
    simple_logger::init_with_level(level)?;
    log::info!("Log level: {}", level);
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::{env, fs};

    fn temp_png(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("pgm-rs-{}-{}.png", name, std::process::id()))
    }

    #[test]
    fn gray_png_round_trip() {
        let file_path = temp_png("gray");
        let mat = GrayGrid::from_fn(3, 5, |r, c| (r * 50 + c * 10) as u8);
        write_png_gray(&file_path, &mat).unwrap();
        assert_eq!(mat, read_luma(&file_path).unwrap());
        fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn rgb_png_keeps_colors() {
        let file_path = temp_png("rgb");
        let mat = RgbGrid::from_row_slice(1, 2, &[(255, 0, 0), (0, 0, 255)]);
        write_png_rgb(&file_path, &mat).unwrap();
        let img = image::open(&file_path).unwrap().to_rgb8();
        assert_eq!(mat, interop::rgb_matrix_from_image(&img));
        fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(Level::Warn, log_level(0));
        assert_eq!(Level::Debug, log_level(2));
        assert_eq!(Level::Trace, log_level(9));
    }
}
