//! Tunables for random construction and numeric conversion.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{BitError, Result};

/// Configuration shared by constructors and codecs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Half-width of the one-count band used by random construction, as a
    /// fraction of the sequence length (default: 0.01, never below one bit)
    pub density_tolerance: f64,
    /// Usable bits of a single-precision fixed-point conversion (default: 30)
    pub float_bits: usize,
    /// Usable bits of a double-precision fixed-point conversion (default: 62)
    pub double_bits: usize,
    /// Largest chunk width accepted by arithmetic recoding (default: 62)
    pub max_recode_chunk_bits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            density_tolerance: 0.01,
            float_bits: 30,
            double_bits: 62,
            max_recode_chunk_bits: 62,
        }
    }
}

impl Config {
    /// Set the density tolerance.
    pub fn with_density_tolerance(mut self, tolerance: f64) -> Self {
        self.density_tolerance = tolerance;
        self
    }

    /// Set the single-precision truncation width.
    pub fn with_float_bits(mut self, bits: usize) -> Self {
        self.float_bits = bits;
        self
    }

    /// Set the double-precision truncation width.
    pub fn with_double_bits(mut self, bits: usize) -> Self {
        self.double_bits = bits;
        self
    }

    /// Set the largest recoding chunk width.
    pub fn with_max_recode_chunk_bits(mut self, bits: usize) -> Self {
        self.max_recode_chunk_bits = bits;
        self
    }

    /// Reject values that would make the dependent operations meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.density_tolerance) {
            return Err(BitError::invalid(format!(
                "density_tolerance must be in [0, 1], got {}",
                self.density_tolerance
            )));
        }
        if self.float_bits == 0 || self.float_bits > 62 {
            return Err(BitError::invalid(format!(
                "float_bits must be in 1..=62, got {}",
                self.float_bits
            )));
        }
        if self.double_bits == 0 || self.double_bits > 62 {
            return Err(BitError::invalid(format!(
                "double_bits must be in 1..=62, got {}",
                self.double_bits
            )));
        }
        if self.max_recode_chunk_bits == 0 || self.max_recode_chunk_bits > 62 {
            return Err(BitError::invalid(format!(
                "max_recode_chunk_bits must be in 1..=62, got {}",
                self.max_recode_chunk_bits
            )));
        }
        Ok(())
    }
}
