//! Arithmetic recoding of fixed-width chunks.
//!
//! A sequence made of `k` chunks of `chunk_bits` bits, each holding a value
//! in `[0, max_value]`, is folded left to right into a single big integer
//! with radix `max_value + 1`:
//!
//! ```text
//! acc = acc * (max_value + 1) + chunk
//! ```
//!
//! The integer is stored in its minimal byte-aligned form. Decoding peels
//! chunks off the end with `mod`/`div`. The recoding is a bijection; it only
//! shrinks the representation when `max_value + 1` is well below
//! `2^chunk_bits`.
//!
//! ```
//! use bitseq::BitSequence;
//! use bitseq::codec::recode::{compress, uncompress};
//!
//! // three 3-bit chunks, each in 0..=4
//! let data: BitSequence = "011100001".parse().unwrap();
//! let packed = compress(&data, 3, 4).unwrap();
//! assert_eq!(packed.biguint_value(), (3u32 * 25 + 4 * 5 + 1).into());
//! assert_eq!(uncompress(9, &packed, 3, 4).unwrap(), data);
//! ```

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::bits::{BitSequence, BitStore};
use crate::codec::numeric::{read_u64, write_u64};
use crate::config::Config;
use crate::error::{BitError, Result};

/// Fold the chunks of `data` into one integer and store it compactly.
pub fn compress(data: &BitSequence, chunk_bits: usize, max_value: u64) -> Result<BitSequence> {
    compress_with_config(data, chunk_bits, max_value, &Config::default())
}

/// [`compress`] with an explicit chunk-width limit.
pub fn compress_with_config(
    data: &BitSequence,
    chunk_bits: usize,
    max_value: u64,
    config: &Config,
) -> Result<BitSequence> {
    Ok(BitSequence::from_biguint(&fold(
        data, chunk_bits, max_value, config,
    )?))
}

/// The folded integer itself.
pub fn fold(
    data: &BitSequence,
    chunk_bits: usize,
    max_value: u64,
    config: &Config,
) -> Result<BigUint> {
    let radix = check_params(chunk_bits, max_value, config)?;
    let logical = data.logical();
    if logical.len() % chunk_bits != 0 {
        return Err(BitError::invalid(format!(
            "{} bits is not a multiple of the {}-bit chunk",
            logical.len(),
            chunk_bits
        )));
    }

    let mut acc = BigUint::zero();
    for first in (0..logical.len()).step_by(chunk_bits) {
        let chunk = read_u64(&logical, first, first + chunk_bits);
        if chunk > max_value {
            return Err(BitError::invalid(format!(
                "chunk at bit {} holds {}, above the bound {}",
                first, chunk, max_value
            )));
        }
        acc = acc * radix + chunk;
    }
    Ok(acc)
}

/// Rebuild the `original_size`-bit sequence recoded by [`compress`].
pub fn uncompress(
    original_size: usize,
    packed: &BitSequence,
    chunk_bits: usize,
    max_value: u64,
) -> Result<BitSequence> {
    uncompress_with_config(
        original_size,
        packed,
        chunk_bits,
        max_value,
        &Config::default(),
    )
}

/// [`uncompress`] with an explicit chunk-width limit.
pub fn uncompress_with_config(
    original_size: usize,
    packed: &BitSequence,
    chunk_bits: usize,
    max_value: u64,
    config: &Config,
) -> Result<BitSequence> {
    unfold(original_size, &packed.biguint_value(), chunk_bits, max_value, config)
}

/// Inverse of [`fold`].
pub fn unfold(
    original_size: usize,
    value: &BigUint,
    chunk_bits: usize,
    max_value: u64,
    config: &Config,
) -> Result<BitSequence> {
    let radix = check_params(chunk_bits, max_value, config)?;
    if original_size == 0 || original_size % chunk_bits != 0 {
        return Err(BitError::invalid(format!(
            "original size {} is not a positive multiple of the {}-bit chunk",
            original_size, chunk_bits
        )));
    }

    let radix = BigUint::from(radix);
    let mut acc = value.clone();
    let mut store = BitStore::zeros(original_size)?;
    for index in (0..original_size / chunk_bits).rev() {
        let chunk = (&acc % &radix)
            .to_u64()
            .ok_or_else(|| BitError::Overflow("chunk exceeds 64 bits".into()))?;
        acc /= &radix;
        let first = index * chunk_bits;
        write_u64(&mut store, first, first + chunk_bits, chunk);
    }
    if !acc.is_zero() {
        return Err(BitError::invalid(format!(
            "value holds more than {} chunks",
            original_size / chunk_bits
        )));
    }
    Ok(BitSequence::from_store(store))
}

fn check_params(chunk_bits: usize, max_value: u64, config: &Config) -> Result<u64> {
    config.validate()?;
    if chunk_bits == 0 || chunk_bits > config.max_recode_chunk_bits {
        return Err(BitError::invalid(format!(
            "chunk width must be in 1..={}, got {}",
            config.max_recode_chunk_bits, chunk_bits
        )));
    }
    let chunk_max = (1u64 << chunk_bits) - 1;
    if max_value > chunk_max {
        return Err(BitError::invalid(format!(
            "bound {} does not fit in {} bits",
            max_value, chunk_bits
        )));
    }
    Ok(max_value + 1)
}
