//! Hamming neighbourhoods: distance, counting, sampling and enumeration.
//!
//! All distances are logical. A placeholder bit left by
//! [`contract`](crate::BitSequence::contract) stands for a whole range, so
//! flipping it moves the sequence by the length of that range.

pub mod count;
pub mod enumerate;
pub mod sample;

pub use count::binomial;
pub use enumerate::Neighbours;
