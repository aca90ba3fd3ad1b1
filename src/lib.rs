// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # pgm-rs
//!
//! Conversions between PNG images and plain text Portable Gray Map (PGM "P2") files.
//!
//! The PGM codec lives in `core::pgm`, PNG decoding and encoding
//! is delegated to the `image` and `png` crates (see `misc::helper`).
//!
//! ```
//! use pgm_rs::core::pgm::{read::Config, write, Pixels};
//! use pgm_rs::misc::type_aliases::GrayGrid;
//!
//! let mat = GrayGrid::from_row_slice(2, 3, &[0, 64, 128, 160, 192, 255]);
//! let text = write::encode_gray(&mat).unwrap();
//! assert!(text.starts_with("P2\n3 2\n255\n"));
//!
//! let pgm = Config::default().parse(&text).unwrap();
//! assert_eq!(Pixels::Gray(mat), pgm.pixels);
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod misc;
