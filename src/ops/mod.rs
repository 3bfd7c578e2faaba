//! Combinators over bit sequences.
//!
//! - [`bitwise`] - AND, OR, XOR, complement
//! - [`layout`] - slice, concatenate, shift
//! - [`evolve`] - shuffle, crossover, attract, repel

pub mod bitwise;
pub mod evolve;
pub mod layout;
