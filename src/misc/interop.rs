// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interoperability conversions between the `image` buffers and pixel grids.
//!
//! Image buffers are row major while `DMatrix` is column major,
//! so every conversion here goes through pixel coordinates
//! instead of reinterpreting the raw buffers.

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::misc::type_aliases::{GrayGrid, RgbGrid};

/// Convert a gray grid into a `GrayImage`.
/// Inverse operation of `matrix_from_image`.
#[allow(clippy::cast_possible_truncation)]
pub fn image_from_matrix(mat: &GrayGrid) -> GrayImage {
    let (height, width) = mat.shape();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([mat[(y as usize, x as usize)]])
    })
}

/// Convert an RGB grid into an `RgbImage`.
/// Inverse operation of `rgb_matrix_from_image`.
#[allow(clippy::cast_possible_truncation)]
pub fn rgb_from_matrix(mat: &RgbGrid) -> RgbImage {
    let (height, width) = mat.shape();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (r, g, b) = mat[(y as usize, x as usize)];
        Rgb([r, g, b])
    })
}

/// Convert a `GrayImage` into a gray grid of `height` rows and `width` columns.
pub fn matrix_from_image(img: GrayImage) -> GrayGrid {
    let (width, height) = img.dimensions();
    GrayGrid::from_row_slice(height as usize, width as usize, &img.into_raw())
}

/// Convert an `RgbImage` into an RGB grid.
#[allow(clippy::cast_possible_truncation)]
pub fn rgb_matrix_from_image(img: &RgbImage) -> RgbGrid {
    let (width, height) = img.dimensions();
    RgbGrid::from_fn(height as usize, width as usize, |row, col| {
        let Rgb([r, g, b]) = *img.get_pixel(col as u32, row as u32);
        (r, g, b)
    })
}
