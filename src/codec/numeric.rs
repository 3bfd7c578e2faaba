//! Conversions between sequences and numbers.
//!
//! Sequences are read as big-endian unsigned numbers: stored bit 0 is the
//! most significant. Decoders operate on the logical (expanded) content.
//!
//! - Integers keep only the magnitude. `i32` decoding reads the trailing 31
//!   bits, `i64` decoding the trailing 63; the `positive_*` variants add one
//!   so that an all-zero pattern still maps to a value of at least 1.
//! - Floating-point decoding reads the sequence as the binary fraction
//!   `0.b0 b1 b2 ...`, truncated to the configured number of leading bits.
//!   The `normalized_*` variants divide by the largest fraction of the same
//!   width so the result spans `[0, 1]`.

use num_bigint::BigUint;

use crate::bits::{BitSequence, BitStore};
use crate::config::Config;
use crate::error::{BitError, Result};

const INT_BITS: usize = 31;
const LONG_BITS: usize = 63;

/// Read stored bits `[first, last)` as an unsigned number (at most 64 bits).
pub(crate) fn read_u64(store: &BitStore, first: usize, last: usize) -> u64 {
    debug_assert!(last - first <= 64);
    (first..last).fold(0u64, |acc, i| (acc << 1) | store.bit(i) as u64)
}

/// Write `value` into stored bits `[first, last)`, most significant first.
pub(crate) fn write_u64(store: &mut BitStore, first: usize, last: usize, value: u64) {
    let width = last - first;
    for j in 0..width.min(64) {
        store.assign(last - 1 - j, (value >> j) & 1 == 1);
    }
}

fn bit_width(value: u64) -> usize {
    (u64::BITS - value.leading_zeros()) as usize
}

impl BitSequence {
    /// `n` bits whose last bit is `value`.
    pub fn from_bool(value: bool, n: usize) -> Result<Self> {
        let mut store = BitStore::zeros(n)?;
        store.assign(n - 1, value);
        Ok(Self::from_store(store))
    }

    /// `n` bits holding `|value|`.
    pub fn from_int(value: i32, n: usize) -> Result<Self> {
        Self::from_u64(u64::from(value.unsigned_abs()), n)
    }

    /// `n` bits holding `|value|`.
    pub fn from_long(value: i64, n: usize) -> Result<Self> {
        Self::from_u64(value.unsigned_abs(), n)
    }

    /// `n` bits holding `value`, padded with zeros on the left.
    pub fn from_u64(value: u64, n: usize) -> Result<Self> {
        let width = bit_width(value);
        if width > n {
            return Err(BitError::Overflow(format!(
                "{} needs {} bits, only {} available",
                value, width, n
            )));
        }
        let mut store = BitStore::zeros(n)?;
        write_u64(&mut store, 0, n, value);
        Ok(Self::from_store(store))
    }

    /// Minimal byte-aligned representation of `value` (at least one byte).
    pub fn from_biguint(value: &BigUint) -> Self {
        // to_bytes_be yields at least one byte, even for zero
        Self::from_store(BitStore::from_aligned(value.to_bytes_be()))
    }

    /// `n` bits holding `value`, padded with zeros on the left.
    pub fn from_biguint_with_len(value: &BigUint, n: usize) -> Result<Self> {
        let width = value.bits() as usize;
        if width > n {
            return Err(BitError::Overflow(format!(
                "value needs {} bits, only {} available",
                width, n
            )));
        }
        let mut store = BitStore::zeros(n)?;
        for j in 0..width {
            store.assign(n - 1 - j, value.bit(j as u64));
        }
        Ok(Self::from_store(store))
    }

    /// Last logical bit.
    pub fn bool_value(&self) -> bool {
        let logical = self.logical();
        logical.bit(logical.len() - 1)
    }

    /// Magnitude held by the trailing 31 logical bits.
    pub fn int_value(&self) -> i32 {
        self.trailing_u64(INT_BITS) as i32
    }

    /// [`int_value`](Self::int_value) plus one.
    pub fn positive_int_value(&self) -> Result<i32> {
        self.int_value()
            .checked_add(1)
            .ok_or_else(|| BitError::Overflow("positive int value exceeds i32::MAX".into()))
    }

    /// Magnitude held by the trailing 63 logical bits.
    pub fn long_value(&self) -> i64 {
        self.trailing_u64(LONG_BITS) as i64
    }

    /// [`long_value`](Self::long_value) plus one.
    pub fn positive_long_value(&self) -> Result<i64> {
        self.long_value()
            .checked_add(1)
            .ok_or_else(|| BitError::Overflow("positive long value exceeds i64::MAX".into()))
    }

    /// The whole logical content as an unsigned big integer.
    pub fn biguint_value(&self) -> BigUint {
        let logical = self.logical();
        let padding = logical.byte_len() * 8 - logical.len();
        BigUint::from_bytes_be(logical.as_bytes()) >> padding
    }

    /// Binary fraction over the leading 30 bits.
    pub fn float_value(&self) -> f32 {
        self.fraction(Config::default().float_bits, false) as f32
    }

    /// [`float_value`](Self::float_value) rescaled into `[0, 1]`.
    pub fn normalized_float_value(&self) -> f32 {
        self.fraction(Config::default().float_bits, true) as f32
    }

    /// Binary fraction over the leading 62 bits.
    pub fn double_value(&self) -> f64 {
        self.fraction(Config::default().double_bits, false)
    }

    /// [`double_value`](Self::double_value) rescaled into `[0, 1]`.
    pub fn normalized_double_value(&self) -> f64 {
        self.fraction(Config::default().double_bits, true)
    }

    /// Fraction with the truncation width taken from `config`.
    pub fn float_value_with_config(&self, config: &Config, normalized: bool) -> Result<f32> {
        config.validate()?;
        Ok(self.fraction(config.float_bits, normalized) as f32)
    }

    /// Fraction with the truncation width taken from `config`.
    pub fn double_value_with_config(&self, config: &Config, normalized: bool) -> Result<f64> {
        config.validate()?;
        Ok(self.fraction(config.double_bits, normalized))
    }

    fn trailing_u64(&self, bits: usize) -> u64 {
        let logical = self.logical();
        let len = logical.len();
        read_u64(&logical, len.saturating_sub(bits), len)
    }

    fn fraction(&self, max_bits: usize, normalized: bool) -> f64 {
        let logical = self.logical();
        let width = logical.len().min(max_bits);
        let numerator = read_u64(&logical, 0, width) as f64;
        let scale = (1u64 << width) as f64;
        if normalized {
            numerator / (scale - 1.0)
        } else {
            numerator / scale
        }
    }
}
