// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Type aliases for common types used all over the code base.

use nalgebra::DMatrix;

/// Red, green and blue intensities of one pixel.
pub type Rgb8 = (u8, u8, u8);

/// A grid of gray intensities, `height` rows by `width` columns.
pub type GrayGrid = DMatrix<u8>;
/// A grid of RGB pixels, `height` rows by `width` columns.
pub type RgbGrid = DMatrix<Rgb8>;

/// A grid of integer labels, such as the regions of a segmented image.
pub type LabelGrid = DMatrix<u32>;
