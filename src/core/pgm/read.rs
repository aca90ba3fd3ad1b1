// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of PGM P2 text into pixel grids.

use log::debug;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use super::{Error, Pgm, Pixels, MAGIC};
use crate::misc::type_aliases::{GrayGrid, RgbGrid};

/// How body samples map to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// One sample per gray pixel.
    Grayscale,
    /// Three consecutive samples `r g b` per pixel.
    RgbTriplet,
    /// One sample per pixel, replicated in the three RGB channels.
    GrayscaleAsRgb,
}

impl Default for ChannelMode {
    fn default() -> Self {
        ChannelMode::Grayscale
    }
}

/// Configuration of the reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Layout of the samples in the body.
    pub channel_mode: ChannelMode,
}

impl Config {
    /// Parse the full text of a document.
    ///
    /// Lines starting with `#` are comments and ignored.
    /// Line breaks in the body are not significant,
    /// only the total number of samples matters.
    pub fn parse(&self, content: &str) -> Result<Pgm, Error> {
        let mut lines = content.lines().filter(|line| !is_comment(line));

        // Magic number.
        let magic = lines
            .by_ref()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        if magic != MAGIC {
            return Err(Error::BadMagic(magic.to_string()));
        }

        // Dimensions and max value.
        let (width, height) = lines
            .next()
            .and_then(parse::dimensions)
            .ok_or_else(|| bad_header("expected a line with width and height"))?;
        if width == 0 || height == 0 {
            return Err(bad_header("width and height must be positive"));
        }
        let nb_pixels = width
            .checked_mul(height)
            .ok_or_else(|| bad_header("too many pixels"))?;
        let max_value = lines
            .next()
            .and_then(parse::max_value)
            .ok_or_else(|| bad_header("expected a line with the max value"))?;
        if max_value > 255 {
            return Err(bad_header("max values above 255 are not supported"));
        }
        #[allow(clippy::cast_possible_truncation)]
        let max_value = max_value as u8;
        debug!(
            "PGM header: {}x{}, max value {}, {:?}",
            width, height, max_value, self.channel_mode
        );

        // Body.
        let samples = parse::samples(lines)?;
        let pixels = self.channel_mode.assemble(width, height, nb_pixels, &samples)?;
        check_range(&samples, max_value)?;
        Ok(Pgm { max_value, pixels })
    }

    /// Read and parse a whole document from a reader.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Pgm, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse(&content)
    }

    /// Open the file at `file_path` and parse it.
    pub fn read_file<P: AsRef<Path>>(&self, file_path: P) -> Result<Pgm, Error> {
        let file = File::open(&file_path)?;
        debug!("Reading {}", file_path.as_ref().display());
        self.read(BufReader::new(file))
    }
}

impl ChannelMode {
    // Group samples into pixels, the count has to match exactly.
    fn assemble(
        self,
        width: usize,
        height: usize,
        nb_pixels: usize,
        samples: &[i64],
    ) -> Result<Pixels, Error> {
        let per_pixel = match self {
            ChannelMode::RgbTriplet => 3,
            ChannelMode::Grayscale | ChannelMode::GrayscaleAsRgb => 1,
        };
        let expected = nb_pixels.saturating_mul(per_pixel);
        if samples.len() != expected {
            return Err(Error::SampleCountMismatch {
                expected,
                found: samples.len(),
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let values: Vec<u8> = samples.iter().map(|&v| v as u8).collect();
        let pixels = match self {
            ChannelMode::Grayscale => {
                Pixels::Gray(GrayGrid::from_row_slice(height, width, &values))
            }
            ChannelMode::GrayscaleAsRgb => {
                let rgb: Vec<_> = values.iter().map(|&v| (v, v, v)).collect();
                Pixels::Rgb(RgbGrid::from_row_slice(height, width, &rgb))
            }
            ChannelMode::RgbTriplet => {
                let rgb: Vec<_> = values.chunks(3).map(|c| (c[0], c[1], c[2])).collect();
                Pixels::Rgb(RgbGrid::from_row_slice(height, width, &rgb))
            }
        };
        Ok(pixels)
    }
}

fn check_range(samples: &[i64], max_value: u8) -> Result<(), Error> {
    match samples
        .iter()
        .find(|&&v| v < 0 || v > i64::from(max_value))
    {
        Some(&value) => Err(Error::InvalidSampleValue { value, max_value }),
        None => Ok(()),
    }
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn bad_header(reason: &str) -> Error {
    Error::BadHeader(reason.to_string())
}

/// Low level parsers of the header lines and body samples.
pub mod parse {
    use super::Error;
    use nom::{
        character::complete::{digit1, space0, space1},
        combinator::{all_consuming, map_res},
        sequence::{delimited, separated_pair},
        IResult,
    };

    /// Parse a `width height` line.
    pub fn dimensions(line: &str) -> Option<(usize, usize)> {
        all_consuming(delimited(
            space0,
            separated_pair(natural, space1, natural),
            space0,
        ))(line)
        .ok()
        .map(|(_, dims)| dims)
    }

    /// Parse the max value line.
    pub fn max_value(line: &str) -> Option<usize> {
        all_consuming(delimited(space0, natural, space0))(line)
            .ok()
            .map(|(_, value)| value)
    }

    /// Collect the integer samples of all body lines.
    ///
    /// Whitespace and punctuation other than signs and dots separate samples,
    /// so `(10, 20, 30)` yields the three samples 10, 20 and 30.
    pub fn samples<'a, I>(lines: I) -> Result<Vec<i64>, Error>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut samples = Vec::new();
        for line in lines {
            for token in line.split(is_separator).filter(|t| !t.is_empty()) {
                let value: i64 = token
                    .parse()
                    .map_err(|_| Error::MalformedSample(token.to_string()))?;
                samples.push(value);
            }
        }
        Ok(samples)
    }

    fn is_separator(c: char) -> bool {
        c.is_whitespace() || (c.is_ascii_punctuation() && !matches!(c, '-' | '+' | '.'))
    }

    // nom parsers #############################################################

    fn natural(input: &str) -> IResult<&str, usize> {
        map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
    }

} // pub mod parse

#[cfg(test)]
mod tests {

    use super::*;

    fn config(channel_mode: ChannelMode) -> Config {
        Config { channel_mode }
    }

    #[test]
    fn grayscale_body() {
        let pgm = Config::default()
            .parse("P2\n3 2\n255\n0 1 2 \n3 4 255 \n")
            .unwrap();
        assert_eq!(255, pgm.max_value);
        let expected = GrayGrid::from_row_slice(2, 3, &[0, 1, 2, 3, 4, 255]);
        assert_eq!(Pixels::Gray(expected), pgm.pixels);
    }

    #[test]
    fn line_breaks_are_not_significant() {
        let packed = Config::default().parse("P2\n2 2\n255\n1 2 3 4\n").unwrap();
        let split = Config::default().parse("P2\n2 2\n255\n1\n2 3\n\n4").unwrap();
        assert_eq!(packed, split);
    }

    #[test]
    fn magic_is_checked() {
        match Config::default().parse("P5\n2 1\n255\n1 2\n") {
            Err(Error::BadMagic(found)) => assert_eq!("P5", found),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(Config::default().parse(""), Err(Error::BadMagic(_))));
    }

    #[test]
    fn leading_blank_lines_and_comments_are_skipped() {
        let text = "\n  \n  P2  \n# created by hand\n2 1\n# max value\n255\n7 8\n";
        let pgm = Config::default().parse(text).unwrap();
        assert_eq!(Pixels::Gray(GrayGrid::from_row_slice(1, 2, &[7, 8])), pgm.pixels);
    }

    #[test]
    fn bad_headers() {
        for text in &[
            "P2\n",
            "P2\n2\n255\n1 2\n",
            "P2\ntwo 1\n255\n1 2\n",
            "P2\n2 1 3\n255\n1 2\n",
            "P2\n0 1\n255\n",
            "P2\n2 -1\n255\n1 2\n",
            "P2\n2 1\n\n1 2\n",
            "P2\n2 1\nmax\n1 2\n",
            "P2\n2 1\n65535\n1 2\n",
        ] {
            assert!(
                matches!(Config::default().parse(text), Err(Error::BadHeader(_))),
                "{:?} should have a bad header",
                text
            );
        }
    }

    #[test]
    fn sample_count_mismatch() {
        match Config::default().parse("P2\n2 3\n255\n1 2 3 4 5\n") {
            Err(Error::SampleCountMismatch { expected, found }) => {
                assert_eq!((6, 5), (expected, found))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        let too_many = Config::default().parse("P2\n1 1\n255\n1 2\n");
        assert!(matches!(too_many, Err(Error::SampleCountMismatch { .. })));
    }

    #[test]
    fn malformed_sample() {
        match Config::default().parse("P2\n2 1\n255\n1 x2\n") {
            Err(Error::MalformedSample(token)) => assert_eq!("x2", token),
            other => panic!("unexpected result: {:?}", other),
        }
        let decimal = Config::default().parse("P2\n2 1\n255\n1 2.5\n");
        assert!(matches!(decimal, Err(Error::MalformedSample(_))));
    }

    #[test]
    fn out_of_range_samples() {
        match Config::default().parse("P2\n2 1\n100\n50 101\n") {
            Err(Error::InvalidSampleValue { value, max_value }) => {
                assert_eq!((101, 100), (value, max_value))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        let negative = Config::default().parse("P2\n2 1\n255\n-1 0\n");
        assert!(matches!(negative, Err(Error::InvalidSampleValue { value: -1, .. })));
    }

    #[test]
    fn rgb_triplets_with_punctuation() {
        let text = "P2\n2 1\n255\n(10, 20, 30) (40, 50, 60)\n";
        let pgm = config(ChannelMode::RgbTriplet).parse(text).unwrap();
        match pgm.pixels {
            Pixels::Rgb(mat) => assert_eq!(&[(10, 20, 30), (40, 50, 60)], mat.as_slice()),
            other => panic!("unexpected pixels: {:?}", other),
        }
    }

    #[test]
    fn rgb_triplets_count() {
        // 7 samples is not a multiple of 3.
        let text = "P2\n2 1\n255\n1 2 3 4 5 6 7\n";
        match config(ChannelMode::RgbTriplet).parse(text) {
            Err(Error::SampleCountMismatch { expected, found }) => {
                assert_eq!((6, 7), (expected, found))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // Enough samples for gray pixels only.
        let text = "P2\n2 1\n255\n1 2\n";
        let result = config(ChannelMode::RgbTriplet).parse(text);
        assert!(matches!(result, Err(Error::SampleCountMismatch { .. })));
    }

    #[test]
    fn grayscale_as_rgb() {
        let pgm = config(ChannelMode::GrayscaleAsRgb)
            .parse("P2\n2 1\n255\n5 10\n")
            .unwrap();
        match pgm.pixels {
            Pixels::Rgb(mat) => assert_eq!(&[(5, 5, 5), (10, 10, 10)], mat.as_slice()),
            other => panic!("unexpected pixels: {:?}", other),
        }
    }

    #[test]
    fn read_from_reader() {
        let bytes: &[u8] = b"P2\r\n1 2\r\n255\r\n3\r\n4\r\n";
        let pgm = Config::default().read(bytes).unwrap();
        assert_eq!(Pixels::Gray(GrayGrid::from_row_slice(2, 1, &[3, 4])), pgm.pixels);
    }

    #[test]
    fn missing_file() {
        let result = Config::default().read_file("this/file/does/not/exist.pgm");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn header_parsers() {
        assert_eq!(Some((3, 2)), parse::dimensions("3 2"));
        assert_eq!(Some((3, 2)), parse::dimensions(" 3\t 2 "));
        assert_eq!(None, parse::dimensions("3"));
        assert_eq!(Some(255), parse::max_value("255"));
        assert_eq!(None, parse::max_value("255 1"));
    }
}
