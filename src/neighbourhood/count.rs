//! Hamming distance and neighbourhood sizes.

use num_bigint::BigUint;
use num_traits::One;

use crate::bits::BitSequence;
use crate::error::{BitError, Result};

/// Exact binomial coefficient `C(n, k)`; zero when `k > n`.
///
/// Computed iteratively with the multiplicative formula; every intermediate
/// division is exact.
pub fn binomial(n: usize, k: usize) -> BigUint {
    if k > n {
        return BigUint::default();
    }
    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 0..k {
        result *= n - i;
        result /= i + 1;
    }
    result
}

impl BitSequence {
    /// Number of differing logical bits.
    ///
    /// Both operands are compared fully expanded and must have the same
    /// logical length.
    pub fn hamming_distance_to(&self, other: &Self) -> Result<usize> {
        BitError::check_lengths(self.length(), other.length())?;
        let diff = self.logical().xor(&other.logical())?;
        Ok(diff.count_ones())
    }

    /// Number of sequences at distance exactly `h`: `C(length, h)`.
    pub fn number_of_data_on_circle(&self, h: usize) -> Result<BigUint> {
        let n = self.length();
        if h > n {
            return Err(BitError::invalid(format!(
                "radius {} exceeds length {}",
                h, n
            )));
        }
        Ok(binomial(n, h))
    }

    /// Number of sequences at distance in `[lower, upper]`.
    pub fn number_of_data_in_neighbourhood(&self, lower: usize, upper: usize) -> Result<BigUint> {
        let n = self.length();
        if lower > upper || upper > n {
            return Err(BitError::invalid(format!(
                "radii [{}, {}] invalid for length {}",
                lower, upper, n
            )));
        }
        Ok((lower..=upper).map(|h| binomial(n, h)).sum())
    }
}
