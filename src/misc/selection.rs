// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Selection of an image among the png files of a directory.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// Reasons why a user answer does not designate an image.
#[derive(Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// There is nothing to choose from.
    NoImages,
    /// The answer is not a number.
    NotANumber(String),
    /// The 1-based choice is not in `1..=count`.
    OutOfRange {
        /// The number entered.
        choice: usize,
        /// Number of available images.
        count: usize,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoImages => write!(f, "No png image to choose from"),
            SelectionError::NotANumber(answer) => write!(f, "\"{}\" is not a number", answer),
            SelectionError::OutOfRange { choice, count } => {
                write!(f, "Choice {} is not between 1 and {}", choice, count)
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// List the png files of a directory, sorted by name.
pub fn list_png<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "png") {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Numbered list of the images file names, one per line, starting at 1.
pub fn menu(images: &[PathBuf]) -> String {
    images
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let name = path.file_name().unwrap_or_else(|| path.as_os_str());
            format!("{}. {}\n", i + 1, name.to_string_lossy())
        })
        .collect()
}

/// Pick the image designated by a 1-based answer.
pub fn choose<'a>(images: &'a [PathBuf], answer: &str) -> Result<&'a PathBuf, SelectionError> {
    if images.is_empty() {
        return Err(SelectionError::NoImages);
    }
    let answer = answer.trim();
    let choice: usize = answer
        .parse()
        .map_err(|_| SelectionError::NotANumber(answer.to_string()))?;
    match choice.checked_sub(1).and_then(|index| images.get(index)) {
        Some(path) => Ok(path),
        None => Err(SelectionError::OutOfRange {
            choice,
            count: images.len(),
        }),
    }
}
