// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coloring of label grids, such as the regions of a segmentation.
//!
//! Colored grids are typically saved with `pgm::write::write_rgb_file`
//! and read back with the `RgbTriplet` channel mode.

use std::{collections::HashMap, fmt};

use crate::misc::type_aliases::{LabelGrid, Rgb8, RgbGrid};

/// Number of colors when each channel takes one of 255 levels.
const SPECTRUM: usize = 255 * 255 * 255;

/// Strategies to give a color to each label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// The label of the top left pixel is the background, painted black.
    /// Every other label is painted white.
    Dual,
    /// Colors picked among `n` evenly spaced levels,
    /// the three channels being shifted by one level.
    /// Supports at most `n` distinct labels.
    UniqueChannel(usize),
    /// Colors spread over the whole RGB cube for about `n` labels.
    Spread(usize),
}

/// Errors while coloring a label grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The label grid has no pixel.
    EmptyLabels,
    /// The palette size cannot produce any color.
    InvalidSize(usize),
    /// There are more distinct labels than available colors.
    Exhausted {
        /// Number of colors attributed before running out.
        colors: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyLabels => write!(f, "Cannot color an empty label grid"),
            Error::InvalidSize(size) => write!(f, "Invalid palette size {}", size),
            Error::Exhausted { colors } => {
                write!(f, "More distinct labels than the {} available colors", colors)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Palette {
    /// Give a color to every pixel of the label grid.
    ///
    /// Labels get their color in the order they are met,
    /// scanning the grid row by row.
    pub fn colorize(self, labels: &LabelGrid) -> Result<RgbGrid, Error> {
        if labels.is_empty() {
            return Err(Error::EmptyLabels);
        }
        match self {
            Palette::Dual => {
                let background = labels[(0, 0)];
                Ok(labels.map(|label| {
                    if label == background {
                        (0, 0, 0)
                    } else {
                        (255, 255, 255)
                    }
                }))
            }
            Palette::UniqueChannel(size) => remap(labels, unique_channel(size)?),
            Palette::Spread(size) => remap(labels, spread(size)?),
        }
    }
}

// Attribute colors to labels by order of appearance.
// `next_color` returns None when no color is left.
fn remap<F>(labels: &LabelGrid, mut next_color: F) -> Result<RgbGrid, Error>
where
    F: FnMut(usize) -> Option<Rgb8>,
{
    let (nb_rows, nb_cols) = labels.shape();
    let mut colors: HashMap<u32, Rgb8> = HashMap::new();
    let mut pixels = Vec::with_capacity(nb_rows * nb_cols);
    for row in labels.row_iter() {
        for &label in row.iter() {
            let nb_colors = colors.len();
            let color = match colors.get(&label) {
                Some(&color) => color,
                None => {
                    let color =
                        next_color(nb_colors).ok_or(Error::Exhausted { colors: nb_colors })?;
                    colors.insert(label, color);
                    color
                }
            };
            pixels.push(color);
        }
    }
    Ok(RgbGrid::from_row_slice(nb_rows, nb_cols, &pixels))
}

#[allow(clippy::cast_possible_truncation)]
fn unique_channel(size: usize) -> Result<impl FnMut(usize) -> Option<Rgb8>, Error> {
    if size < 2 {
        return Err(Error::InvalidSize(size));
    }
    let divisions = 255 / (size - 1).min(255);
    let level = move |i: usize| ((divisions * (i % size)) % 255) as u8;
    Ok(move |k: usize| {
        if k < size {
            Some((level(k), level(k + 1), level(k + 2)))
        } else {
            None
        }
    })
}

#[allow(clippy::cast_possible_truncation)]
fn spread(size: usize) -> Result<impl FnMut(usize) -> Option<Rgb8>, Error> {
    if size == 0 {
        return Err(Error::InvalidSize(size));
    }
    let step = integer_cbrt(SPECTRUM / size).max(1);
    let (mut r, mut g, mut b) = (0, 0, 0);
    let mut exhausted = false;
    Ok(move |_: usize| {
        if exhausted {
            return None;
        }
        let color = (r as u8, g as u8, b as u8);
        r += step;
        if r > 255 {
            r -= 256;
            g += step;
            if g > 255 {
                g -= 256;
                b += step;
                exhausted = b > 255;
            }
        }
        Some(color)
    })
}

/// Largest integer whose cube is not above `n`.
fn integer_cbrt(n: usize) -> usize {
    let mut root = (n as f64).cbrt() as usize;
    while (root + 1).pow(3) <= n {
        root += 1;
    }
    while root.pow(3) > n {
        root -= 1;
    }
    root
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn dual_uses_top_left_as_background() {
        let labels = LabelGrid::from_row_slice(2, 2, &[7, 3, 7, 9]);
        let colored = Palette::Dual.colorize(&labels).unwrap();
        let black = (0, 0, 0);
        let white = (255, 255, 255);
        assert_eq!(RgbGrid::from_row_slice(2, 2, &[black, white, black, white]), colored);
    }

    #[test]
    fn unique_channel_shifts_levels() {
        // Levels are 0, 127 and 254.
        let labels = LabelGrid::from_row_slice(2, 2, &[4, 8, 4, 1]);
        let colored = Palette::UniqueChannel(3).colorize(&labels).unwrap();
        let expected = [(0, 127, 254), (127, 254, 0), (0, 127, 254), (254, 0, 127)];
        assert_eq!(RgbGrid::from_row_slice(2, 2, &expected), colored);
    }

    #[test]
    fn unique_channel_limits() {
        let labels = LabelGrid::from_row_slice(1, 3, &[1, 2, 3]);
        assert_eq!(
            Err(Error::Exhausted { colors: 2 }),
            Palette::UniqueChannel(2).colorize(&labels)
        );
        assert_eq!(
            Err(Error::InvalidSize(1)),
            Palette::UniqueChannel(1).colorize(&labels)
        );
    }

    #[test]
    fn spread_carries_into_next_channels() {
        // A single color means a step of 255.
        let labels = LabelGrid::from_row_slice(1, 4, &[0, 1, 2, 3]);
        let colored = Palette::Spread(1).colorize(&labels).unwrap();
        let expected = [(0, 0, 0), (255, 0, 0), (254, 255, 0), (253, 254, 255)];
        assert_eq!(RgbGrid::from_row_slice(1, 4, &expected), colored);

        let labels = LabelGrid::from_row_slice(1, 5, &[0, 1, 2, 3, 4]);
        assert_eq!(
            Err(Error::Exhausted { colors: 4 }),
            Palette::Spread(1).colorize(&labels)
        );
    }

    #[test]
    fn spread_colors_are_distinct() {
        let labels = LabelGrid::from_fn(10, 10, |r, c| (r * 10 + c) as u32);
        let colored = Palette::Spread(100).colorize(&labels).unwrap();
        let mut colors: Vec<Rgb8> = colored.iter().cloned().collect();
        colors.sort();
        colors.dedup();
        assert_eq!(100, colors.len());
    }

    #[test]
    fn empty_labels() {
        let labels = LabelGrid::from_row_slice(0, 0, &[]);
        assert_eq!(Err(Error::EmptyLabels), Palette::Dual.colorize(&labels));
        let single = LabelGrid::zeros(1, 1);
        assert_eq!(Err(Error::InvalidSize(0)), Palette::Spread(0).colorize(&single));
    }

    #[test]
    fn cube_roots() {
        assert_eq!(255, integer_cbrt(SPECTRUM));
        assert_eq!(3, integer_cbrt(63));
        assert_eq!(4, integer_cbrt(64));
        assert_eq!(0, integer_cbrt(0));
    }
}
