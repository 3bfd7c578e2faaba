//! Packed byte-backed bit storage.
//!
//! # Layout
//!
//! Bit `i` lives in byte `i / 8` at MSB-first position `i % 8`, so the
//! first bit of the store is the `0x80` bit of byte 0. The logical size
//! need not be a multiple of 8; the padding bits of the final byte are
//! always zero. Byte-wise comparison of two stores of equal size is
//! therefore the same as bit-wise lexicographic comparison.

use crate::error::{BitError, Result};
use crate::util::table::{leading_mask, select_in_byte};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packed storage for a non-zero number of bits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawBitStore")
)]
pub struct BitStore {
    /// Number of logical bits (always > 0).
    size: usize,
    /// `ceil(size / 8)` bytes, padding bits zeroed.
    bytes: Vec<u8>,
}

impl BitStore {
    /// Create a store of `size` zero bits.
    pub fn zeros(size: usize) -> Result<Self> {
        Self::filled(size, false)
    }

    /// Create a store of `size` bits all equal to `bit`.
    pub fn filled(size: usize, bit: bool) -> Result<Self> {
        if size == 0 {
            return Err(BitError::invalid("a bit sequence needs at least one bit"));
        }
        let fill = if bit { 0xFF } else { 0x00 };
        let mut store = Self {
            size,
            bytes: vec![fill; size.div_ceil(8)],
        };
        store.mask_padding();
        Ok(store)
    }

    /// Build a store from a packed buffer holding at least `size` bits.
    ///
    /// Extra bytes beyond `ceil(size / 8)` are ignored and padding bits in the
    /// last kept byte are cleared.
    pub fn from_bytes(size: usize, bytes: &[u8]) -> Result<Self> {
        if size == 0 {
            return Err(BitError::invalid("a bit sequence needs at least one bit"));
        }
        let needed = size.div_ceil(8);
        if bytes.len() < needed {
            return Err(BitError::invalid(format!(
                "{} bits need {} bytes, got {}",
                size,
                needed,
                bytes.len()
            )));
        }
        let mut store = Self {
            size,
            bytes: bytes[..needed].to_vec(),
        };
        store.mask_padding();
        Ok(store)
    }

    /// Whole bytes as a store of `8 * bytes.len()` bits; `bytes` is non-empty.
    pub(crate) fn from_aligned(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty());
        Self {
            size: bytes.len() * 8,
            bytes,
        }
    }

    /// Number of logical bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false: a store holds at least one bit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of backing bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Packed backing bytes, padding included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy of the packed backing bytes.
    pub fn to_byte_array(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Read bit `i`.
    pub fn get(&self, i: usize) -> Result<bool> {
        BitError::check_index(i, self.size)?;
        Ok(self.bit(i))
    }

    /// Write bit `i`.
    pub fn set(&mut self, i: usize, bit: bool) -> Result<()> {
        BitError::check_index(i, self.size)?;
        self.assign(i, bit);
        Ok(())
    }

    /// Toggle bit `i`.
    pub fn flip(&mut self, i: usize) -> Result<()> {
        BitError::check_index(i, self.size)?;
        self.toggle(i);
        Ok(())
    }

    #[inline]
    pub(crate) fn bit(&self, i: usize) -> bool {
        (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1
    }

    #[inline]
    pub(crate) fn assign(&mut self, i: usize, bit: bool) {
        let mask = 0x80u8 >> (i % 8);
        if bit {
            self.bytes[i / 8] |= mask;
        } else {
            self.bytes[i / 8] &= !mask;
        }
    }

    #[inline]
    pub(crate) fn toggle(&mut self, i: usize) {
        self.bytes[i / 8] ^= 0x80u8 >> (i % 8);
    }

    /// Count set bits in `[0, size)`.
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Count clear bits in `[0, size)`.
    pub fn count_zeros(&self) -> usize {
        self.size - self.count_ones()
    }

    /// Count set bits in `[0, i)`; `i` is clamped to the size.
    pub fn rank1(&self, i: usize) -> usize {
        let i = i.min(self.size);
        let full = i / 8;
        let mut count: usize = self.bytes[..full]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        let rem = i % 8;
        if rem > 0 {
            count += (self.bytes[full] & leading_mask(rem)).count_ones() as usize;
        }
        count
    }

    /// Position of the k-th set bit (0-indexed).
    pub fn select1(&self, k: usize) -> Option<usize> {
        let mut remaining = k;
        for (idx, &byte) in self.bytes.iter().enumerate() {
            let ones = byte.count_ones() as usize;
            if remaining < ones {
                let pos = select_in_byte(byte, remaining as u32) as usize;
                return Some(idx * 8 + pos);
            }
            remaining -= ones;
        }
        None
    }

    /// Position of the k-th clear bit (0-indexed).
    pub fn select0(&self, k: usize) -> Option<usize> {
        let mut remaining = k;
        for (idx, &byte) in self.bytes.iter().enumerate() {
            let valid = (self.size - idx * 8).min(8);
            let inverted = !byte & leading_mask(valid);
            let zeros = inverted.count_ones() as usize;
            if remaining < zeros {
                let pos = select_in_byte(inverted, remaining as u32) as usize;
                return Some(idx * 8 + pos);
            }
            remaining -= zeros;
        }
        None
    }

    /// Bits `[first, last)` as a new store.
    ///
    /// Handles ranges that start and end off byte boundaries by recombining
    /// adjacent bytes with shifts.
    pub fn slice(&self, first: usize, last: usize) -> Result<Self> {
        if first >= last || last > self.size {
            return Err(BitError::invalid(format!(
                "slice [{}, {}) is not a non-empty range within {} bits",
                first, last, self.size
            )));
        }
        let size = last - first;
        let out_len = size.div_ceil(8);
        let shift = first % 8;
        let base = first / 8;
        let mut bytes = Vec::with_capacity(out_len);
        if shift == 0 {
            bytes.extend_from_slice(&self.bytes[base..base + out_len]);
        } else {
            for j in 0..out_len {
                let hi = self.bytes[base + j] << shift;
                let lo = self
                    .bytes
                    .get(base + j + 1)
                    .map_or(0, |&next| next >> (8 - shift));
                bytes.push(hi | lo);
            }
        }
        let mut store = Self { size, bytes };
        store.mask_padding();
        Ok(store)
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.append(other);
        out
    }

    /// Append `other` in place.
    pub(crate) fn append(&mut self, other: &Self) {
        let shift = self.size % 8;
        if shift == 0 {
            self.bytes.extend_from_slice(&other.bytes);
        } else {
            for &byte in &other.bytes {
                if let Some(last) = self.bytes.last_mut() {
                    *last |= byte >> shift;
                }
                self.bytes.push(byte << (8 - shift));
            }
        }
        self.size += other.size;
        self.bytes.truncate(self.size.div_ceil(8));
        self.mask_padding();
    }

    /// Bitwise AND of two stores of equal size.
    pub fn and(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a & b)
    }

    /// Bitwise OR of two stores of equal size.
    pub fn or(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a | b)
    }

    /// Bitwise XOR of two stores of equal size.
    pub fn xor(&self, other: &Self) -> Result<Self> {
        let mut out = self.zip_with(other, |a, b| a ^ b)?;
        out.mask_padding();
        Ok(out)
    }

    /// Complement of every bit.
    pub fn not(&self) -> Self {
        let mut out = Self {
            size: self.size,
            bytes: self.bytes.iter().map(|b| !b).collect(),
        };
        out.mask_padding();
        out
    }

    fn zip_with(&self, other: &Self, f: impl Fn(u8, u8) -> u8) -> Result<Self> {
        BitError::check_lengths(self.size, other.size)?;
        Ok(Self {
            size: self.size,
            bytes: self
                .bytes
                .iter()
                .zip(&other.bytes)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// True when every bit has the same value.
    pub fn is_constant(&self) -> bool {
        let ones = self.count_ones();
        ones == 0 || ones == self.size
    }

    fn mask_padding(&mut self) {
        let rem = self.size % 8;
        if rem != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= leading_mask(rem);
            }
        }
    }
}

/// Unchecked wire form of a [`BitStore`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
pub(crate) struct RawBitStore {
    pub(crate) size: usize,
    pub(crate) bytes: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBitStore> for BitStore {
    type Error = BitError;

    /// Exactly `ceil(size / 8)` bytes with clear padding; nothing is repaired.
    fn try_from(raw: RawBitStore) -> Result<Self> {
        let store = Self::from_bytes(raw.size, &raw.bytes)?;
        if raw.bytes.len() != store.bytes.len() || raw.bytes != store.bytes {
            return Err(BitError::invalid(format!(
                "{} bits must be stored in {} bytes with clear padding",
                raw.size,
                store.bytes.len()
            )));
        }
        Ok(store)
    }
}

/// Append-only bit buffer used to assemble stores piece by piece.
#[derive(Debug, Default)]
pub(crate) struct BitBuffer {
    size: usize,
    bytes: Vec<u8>,
}

impl BitBuffer {
    pub(crate) fn with_capacity(bits: usize) -> Self {
        Self {
            size: 0,
            bytes: Vec::with_capacity(bits.div_ceil(8)),
        }
    }

    pub(crate) fn push(&mut self, bit: bool) {
        if self.size % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> (self.size % 8);
            }
        }
        self.size += 1;
    }

    pub(crate) fn extend_range(&mut self, store: &BitStore, first: usize, last: usize) {
        for i in first..last {
            self.push(store.bit(i));
        }
    }

    /// Convert into a store; the caller guarantees at least one bit was pushed.
    pub(crate) fn into_store(self) -> BitStore {
        debug_assert!(self.size > 0);
        BitStore {
            size: self.size,
            bytes: self.bytes,
        }
    }

    pub(crate) fn finish(self) -> Result<BitStore> {
        if self.size == 0 {
            return Err(BitError::invalid("a bit sequence needs at least one bit"));
        }
        Ok(BitStore {
            size: self.size,
            bytes: self.bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(text: &str) -> BitStore {
        let mut buf = BitBuffer::default();
        for c in text.chars() {
            buf.push(c == '1');
        }
        buf.finish().unwrap()
    }

    fn text(store: &BitStore) -> String {
        (0..store.len())
            .map(|i| if store.bit(i) { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(BitStore::zeros(0).is_err());
        assert!(BitStore::from_bytes(0, &[0xFF]).is_err());
    }

    #[test]
    fn test_filled_masks_padding() {
        let s = BitStore::filled(11, true).unwrap();
        assert_eq!(s.as_bytes(), &[0xFF, 0xE0]);
        assert_eq!(s.count_ones(), 11);
        assert_eq!(s.count_zeros(), 0);
    }

    #[test]
    fn test_from_bytes_masks_padding() {
        let s = BitStore::from_bytes(4, &[0xFF, 0x12]).unwrap();
        assert_eq!(s.as_bytes(), &[0xF0]);
        assert!(BitStore::from_bytes(9, &[0xFF]).is_err());
    }

    #[test]
    fn test_get_set_flip() {
        let mut s = BitStore::zeros(10).unwrap();
        s.set(9, true).unwrap();
        s.flip(0).unwrap();
        assert_eq!(text(&s), "1000000001");
        assert!(s.get(9).unwrap());
        assert_eq!(
            s.get(10),
            Err(BitError::IndexOutOfRange { index: 10, len: 10 })
        );
        assert!(s.flip(10).is_err());
    }

    #[test]
    fn test_slice_unaligned() {
        let s = store("1011001110001111");
        assert_eq!(text(&s.slice(3, 13).unwrap()), "1001110001");
        assert_eq!(text(&s.slice(0, 16).unwrap()), "1011001110001111");
        assert_eq!(text(&s.slice(15, 16).unwrap()), "1");
        assert!(s.slice(4, 4).is_err());
        assert!(s.slice(4, 17).is_err());
    }

    #[test]
    fn test_concat_both_paths() {
        let aligned = store("10110011");
        let tail = store("101");
        assert_eq!(text(&aligned.concat(&tail)), "10110011101");

        let odd = store("101");
        let long = store("1111000011");
        let joined = odd.concat(&long);
        assert_eq!(text(&joined), "1011111000011");
        assert_eq!(joined.byte_len(), 2);
        assert_eq!(joined.count_ones(), 8);
    }

    #[test]
    fn test_bitwise() {
        let a = store("1011");
        let b = store("0011");
        assert_eq!(text(&a.xor(&b).unwrap()), "1000");
        assert_eq!(text(&a.and(&b).unwrap()), "0011");
        assert_eq!(text(&a.or(&b).unwrap()), "1011");
        assert_eq!(text(&a.not()), "0100");
        assert_eq!(a.not().as_bytes(), &[0x40]);
        assert!(a.xor(&store("101")).is_err());
    }

    #[test]
    fn test_rank_select() {
        let s = store("0110100011");
        assert_eq!(s.rank1(0), 0);
        assert_eq!(s.rank1(3), 2);
        assert_eq!(s.rank1(10), 5);
        assert_eq!(s.rank1(99), 5);
        assert_eq!(s.select1(0), Some(1));
        assert_eq!(s.select1(4), Some(9));
        assert_eq!(s.select1(5), None);
        assert_eq!(s.select0(0), Some(0));
        assert_eq!(s.select0(4), Some(7));
        assert_eq!(s.select0(5), None);
    }

    #[test]
    fn test_buffer_extend_mixed_alignment() {
        let mut buf = BitBuffer::with_capacity(20);
        buf.extend_range(&store("10101010"), 0, 8);
        buf.push(true);
        buf.extend_range(&store("0011"), 0, 4);
        buf.extend_range(&store("111000"), 2, 5);
        assert_eq!(text(&buf.finish().unwrap()), "1010101010011100");
    }

    #[test]
    fn test_is_constant() {
        assert!(store("0000").is_constant());
        assert!(store("111").is_constant());
        assert!(!store("101").is_constant());
    }
}
