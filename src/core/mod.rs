//! Core functionalities of pgm-rs.

pub mod palette;
pub mod pgm;
