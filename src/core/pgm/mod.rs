// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain text Portable Gray Map (PGM "P2") codec.
//!
//! A document is made of three header lines and a body of integer samples:
//!
//! ```text
//! P2
//! 3 2
//! 255
//! 0 128 255
//! 64 32 16
//! ```
//!
//! Pixel grids are `DMatrix` values with one row of the matrix per image row.
//! Besides plain gray samples, the reader understands bodies where samples are
//! grouped in `r g b` triplets, optionally decorated as `(r, g, b)`.

pub mod read;
pub mod write;

use std::{fmt, io, path::Path};

use crate::misc::helper;
use crate::misc::type_aliases::{GrayGrid, RgbGrid};

/// The magic token starting every plain text PGM document.
pub const MAGIC: &str = "P2";

/// Max value written in the header of encoded documents.
pub const MAX_VALUE: u8 = 255;

/// Errors of the PGM reader and writer.
#[derive(Debug)]
pub enum Error {
    /// Width or height of the grid is zero.
    InvalidDimensions {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// A sample lies outside of `[0, max_value]`.
    InvalidSampleValue {
        /// The offending sample.
        value: i64,
        /// Max value declared in the header.
        max_value: u8,
    },
    /// The document does not start with `P2`, contains the first line found.
    BadMagic(String),
    /// The dimensions or max value line could not be understood.
    BadHeader(String),
    /// A body token is not an integer.
    MalformedSample(String),
    /// The body does not hold exactly the number of values the header announces.
    SampleCountMismatch {
        /// Number of integers required by the header and the channel mode.
        expected: usize,
        /// Number of integers present in the body.
        found: usize,
    },
    /// Reading from or writing to the underlying stream failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {}x{}, both must be positive", width, height)
            }
            Error::InvalidSampleValue { value, max_value } => write!(
                f,
                "Sample value {} is outside of the range [0, {}]",
                value, max_value
            ),
            Error::BadMagic(found) => {
                write!(f, "Expected \"{}\" as magic number but got \"{}\"", MAGIC, found)
            }
            Error::BadHeader(reason) => write!(f, "Invalid header, reason: {}", reason),
            Error::MalformedSample(token) => write!(f, "Sample \"{}\" is not an integer", token),
            Error::SampleCountMismatch { expected, found } => write!(
                f,
                "Expected {} values in the body but found {}",
                expected, found
            ),
            Error::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// A parsed PGM document.
#[derive(Debug, Clone, PartialEq)]
pub struct Pgm {
    /// Max value declared in the header.
    pub max_value: u8,
    /// Decoded pixels, in the layout chosen by the reader channel mode.
    pub pixels: Pixels,
}

/// Pixel grid of a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Pixels {
    /// One intensity per pixel.
    Gray(GrayGrid),
    /// Three intensities per pixel.
    Rgb(RgbGrid),
}

impl Pixels {
    /// Number of columns of the grid.
    pub fn width(&self) -> usize {
        match self {
            Pixels::Gray(mat) => mat.ncols(),
            Pixels::Rgb(mat) => mat.ncols(),
        }
    }

    /// Number of rows of the grid.
    pub fn height(&self) -> usize {
        match self {
            Pixels::Gray(mat) => mat.nrows(),
            Pixels::Rgb(mat) => mat.nrows(),
        }
    }

    /// Promote to RGB, gray values are replicated in the three channels.
    pub fn into_rgb(self) -> RgbGrid {
        match self {
            Pixels::Gray(mat) => mat.map(|v| (v, v, v)),
            Pixels::Rgb(mat) => mat,
        }
    }

    /// Save the pixels as an 8 bits PNG image, gray or RGB depending on the layout.
    pub fn write_png<P: AsRef<Path>>(&self, file_path: P) -> Result<(), png::EncodingError> {
        match self {
            Pixels::Gray(mat) => helper::write_png_gray(file_path, mat),
            Pixels::Rgb(mat) => helper::write_png_rgb(file_path, mat),
        }
    }
}
