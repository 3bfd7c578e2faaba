//! Numeric and textual (de)serialization of bit sequences.
//!
//! - [`numeric`] - booleans, integers, big integers, fixed-point fractions
//! - [`text`] - ASCII characters and the 5-bit letter code
//! - [`recode`] - arithmetic recoding of bounded fixed-width chunks

pub mod numeric;
pub mod recode;
pub mod text;

pub use recode::{compress, uncompress};
