//! # bitseq
//!
//! Packed bit sequences for metaheuristic search.
//!
//! A [`BitSequence`] is the decision variable of a binary search space. The
//! crate provides the value type itself, numeric codecs that give bits a
//! meaning, variation operators, a structural compressor that collapses
//! ranges into single placeholder bits, and Hamming-neighbourhood sampling
//! and enumeration for local search.
//!
//! ## Module Organization
//!
//! - [`bits`] - Packed storage, the sequence value type, cursors, rank/select
//! - [`codec`] - Numbers, characters and arithmetic recoding
//! - [`ops`] - Bitwise combinators, slicing and randomized operators
//! - [`contract`] - Contraction of ranges into placeholder bits
//! - [`neighbourhood`] - Distances, neighbourhood sizes, sampling, enumeration
//!
//! ## Quick Start
//!
//! ```
//! use bitseq::{BitSequence, RankSelect};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let data: BitSequence = "1011".parse().unwrap();
//! let mask: BitSequence = "0011".parse().unwrap();
//! assert_eq!(data.xor(&mask).unwrap().to_string(), "[1000] (4;1)");
//!
//! // rank/select over stored bits
//! assert_eq!(data.rank1(3), 2);
//! assert_eq!(data.select1(1), Some(2));
//!
//! // seeded sampling is reproducible
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let near = data.random_select_in_neighbourhood(2, 2, &mut rng).unwrap();
//! assert_eq!(near.hamming_distance_to(&data).unwrap(), 2);
//! ```
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization support
//! - `cli` - Build the `bitseq` command-line tool

// =============================================================================
// Core modules
// =============================================================================

/// Packed bit storage and the sequence value type.
pub mod bits;

/// Conversions between sequences and values.
pub mod codec;

/// Tunable numeric parameters.
pub mod config;

/// Structural compression of bit ranges.
pub mod contract;

/// Error type.
pub mod error;

/// Hamming-neighbourhood operations.
pub mod neighbourhood;

/// Combinators and variation operators.
pub mod ops;

/// Internal utilities (not part of public API).
pub(crate) mod util;

// =============================================================================
// Public re-exports
// =============================================================================

pub use bits::{BitCursor, BitSequence, BitStore, CursorState};
pub use codec::{compress, uncompress};
pub use config::Config;
pub use contract::Substitutions;
pub use error::{BitError, Result};
pub use neighbourhood::{binomial, Neighbours};

// =============================================================================
// Core traits
// =============================================================================

/// Trait for rank/select operations over stored bits.
///
/// - `rank1(i)`: Count 1-bits in positions `[0, i)`
/// - `select1(k)`: Find position of the k-th 1-bit (0-indexed)
pub trait RankSelect {
    /// Count 1-bits in positions `[0, i)`.
    ///
    /// Returns 0 if `i == 0`.
    fn rank1(&self, i: usize) -> usize;

    /// Count 0-bits in positions `[0, i)`.
    ///
    /// Default implementation: `i - rank1(i)`
    #[inline]
    fn rank0(&self, i: usize) -> usize {
        i - self.rank1(i)
    }

    /// Find position of the k-th 1-bit (0-indexed).
    ///
    /// Returns `None` if fewer than `k+1` ones exist.
    fn select1(&self, k: usize) -> Option<usize>;
}
