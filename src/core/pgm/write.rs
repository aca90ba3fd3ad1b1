// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Serialization of pixel grids into PGM P2 text.
//!
//! Documents are always built entirely in memory first.
//! File outputs are then written next to the destination and renamed over it,
//! so a failure never leaves a truncated document behind.

use log::info;
use nalgebra::{DMatrix, Scalar};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use super::{Error, MAGIC, MAX_VALUE};
use crate::misc::type_aliases::{GrayGrid, RgbGrid};

/// Encode a gray grid.
///
/// Each sample is followed by a space, and each row by a new line.
pub fn encode_gray(mat: &GrayGrid) -> Result<String, Error> {
    encode(mat, 4, |text, &v| push_sample(text, v))
}

/// Encode an RGB grid, each pixel being written as an `r g b ` triplet.
pub fn encode_rgb(mat: &RgbGrid) -> Result<String, Error> {
    encode(mat, 12, |text, &(r, g, b)| {
        push_sample(text, r);
        push_sample(text, g);
        push_sample(text, b);
    })
}

/// Encode a gray grid into a writer.
pub fn write_gray<W: Write>(mat: &GrayGrid, mut writer: W) -> Result<(), Error> {
    writer.write_all(encode_gray(mat)?.as_bytes())?;
    Ok(())
}

/// Encode an RGB grid into a writer.
pub fn write_rgb<W: Write>(mat: &RgbGrid, mut writer: W) -> Result<(), Error> {
    writer.write_all(encode_rgb(mat)?.as_bytes())?;
    Ok(())
}

/// Create or replace the file at `file_path` with the encoded gray grid.
pub fn write_gray_file<P: AsRef<Path>>(mat: &GrayGrid, file_path: P) -> Result<(), Error> {
    replace_file(file_path.as_ref(), encode_gray(mat)?.as_bytes())
}

/// Create or replace the file at `file_path` with the encoded RGB grid.
pub fn write_rgb_file<P: AsRef<Path>>(mat: &RgbGrid, file_path: P) -> Result<(), Error> {
    replace_file(file_path.as_ref(), encode_rgb(mat)?.as_bytes())
}

/// Header lines of a document.
pub fn header(width: usize, height: usize) -> String {
    format!("{}\n{} {}\n{}\n", MAGIC, width, height, MAX_VALUE)
}

// Shared encoding loop, `pixel_len` is a rough size hint per pixel.
fn encode<T, F>(mat: &DMatrix<T>, pixel_len: usize, push_pixel: F) -> Result<String, Error>
where
    T: Scalar,
    F: Fn(&mut String, &T),
{
    let (height, width) = mat.shape();
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let mut text = header(width, height);
    text.reserve(width * height * pixel_len + height);
    for row in mat.row_iter() {
        for pixel in row.iter() {
            push_pixel(&mut text, pixel);
        }
        text.push('\n');
    }
    Ok(text)
}

fn push_sample(text: &mut String, value: u8) {
    text.push_str(&value.to_string());
    text.push(' ');
}

fn replace_file(file_path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let tmp_path = temporary_path(file_path);
    let result = fs::write(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, file_path));
    if result.is_err() {
        // Nothing to do if the temporary file was never created.
        let _ = fs::remove_file(&tmp_path);
    }
    result?;
    info!("Wrote {} bytes to {}", bytes.len(), file_path.display());
    Ok(())
}

// "dir/image.pgm" -> "dir/image.pgm.tmp"
fn temporary_path(file_path: &Path) -> PathBuf {
    let mut file_name = file_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(".tmp");
    file_path.with_file_name(file_name)
}
