//! The bit sequence value type.
//!
//! A [`BitSequence`] is a [`BitStore`] plus an optional set of
//! [`Substitutions`]: placeholder bits standing for previously contracted
//! ranges. Only [`contract`](BitSequence::contract) and
//! [`uncontract`](BitSequence::uncontract) mutate a sequence; every other
//! operation returns a new value.
//!
//! Equality, ordering and hashing look at the *logical* content, i.e. the
//! fully expanded bit string. Two sequences with different placeholder
//! structure but the same expansion are equal.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::bits::store::RawBitStore;
use crate::bits::store::{BitBuffer, BitStore};
use crate::config::Config;
use crate::contract::Substitutions;
use crate::error::{BitError, Result};

/// Packed bit sequence with optional structural compression.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawBitSequence")
)]
pub struct BitSequence {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) store: BitStore,
    pub(crate) substitutions: Option<Substitutions>,
}

impl BitSequence {
    pub(crate) fn from_parts(store: BitStore, substitutions: Option<Substitutions>) -> Self {
        Self {
            store,
            substitutions: substitutions.filter(|s| !s.is_empty()),
        }
    }

    /// Wrap a plain store.
    pub fn from_store(store: BitStore) -> Self {
        Self {
            store,
            substitutions: None,
        }
    }

    /// `n` copies of `bit`.
    pub fn filled(n: usize, bit: bool) -> Result<Self> {
        Ok(Self::from_store(BitStore::filled(n, bit)?))
    }

    /// `n` zero bits.
    pub fn zeros(n: usize) -> Result<Self> {
        Self::filled(n, false)
    }

    /// `n` one bits.
    pub fn ones(n: usize) -> Result<Self> {
        Self::filled(n, true)
    }

    /// `n` bits with exactly the given positions set.
    pub fn with_ones(n: usize, positions: &[usize]) -> Result<Self> {
        let mut store = BitStore::zeros(n)?;
        for &pos in positions {
            store.set(pos, true)?;
        }
        Ok(Self::from_store(store))
    }

    /// `n` bits read from a packed MSB-first buffer.
    pub fn from_bytes(n: usize, bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_store(BitStore::from_bytes(n, bytes)?))
    }

    /// Random sequence whose density of ones is close to `p`.
    ///
    /// The exact number of ones is drawn uniformly from a band around
    /// `p * n` whose half-width is [`Config::density_tolerance`] of `n`
    /// (at least one bit). `p` of exactly 0 or 1 yields a constant sequence.
    pub fn random<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<Self> {
        Self::random_with_config(n, p, rng, &Config::default())
    }

    /// [`random`](Self::random) with an explicit configuration.
    pub fn random_with_config<R: Rng + ?Sized>(
        n: usize,
        p: f64,
        rng: &mut R,
        config: &Config,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(BitError::invalid(format!(
                "density must be a probability, got {}",
                p
            )));
        }
        config.validate()?;
        let mut store = BitStore::zeros(n)?;

        let target = (p * n as f64).round() as usize;
        let count = if p == 0.0 || p == 1.0 {
            target
        } else {
            let band = ((config.density_tolerance * n as f64).round() as usize).max(1);
            let lo = target.saturating_sub(band);
            let hi = (target + band).min(n);
            rng.gen_range(lo..=hi)
        };

        for pos in rand::seq::index::sample(rng, n, count) {
            store.assign(pos, true);
        }
        Ok(Self::from_store(store))
    }

    /// [`random`](Self::random) drawing from the thread-local generator.
    pub fn random_thread_rng(n: usize, p: f64) -> Result<Self> {
        Self::random(n, p, &mut rand::thread_rng())
    }

    /// Underlying stored bits (placeholders not expanded).
    pub fn store(&self) -> &BitStore {
        &self.store
    }

    /// Recorded placeholders, if any.
    pub fn substitutions(&self) -> Option<&Substitutions> {
        self.substitutions.as_ref()
    }

    /// Number of stored bits (the compressed size).
    #[inline]
    pub fn number_of_bits(&self) -> usize {
        self.store.len()
    }

    /// Number of backing bytes.
    #[inline]
    pub fn number_of_bytes(&self) -> usize {
        self.store.byte_len()
    }

    /// Logical length after full expansion.
    pub fn length(&self) -> usize {
        match &self.substitutions {
            Some(subs) => subs.logical_len(self.store.len()),
            None => self.store.len(),
        }
    }

    /// Whether any placeholder is recorded.
    #[inline]
    pub fn is_contracted(&self) -> bool {
        self.substitutions.is_some()
    }

    /// Whether stored bit `i` is a placeholder.
    pub fn is_bit_contracted(&self, i: usize) -> Result<bool> {
        BitError::check_index(i, self.store.len())?;
        Ok(self
            .substitutions
            .as_ref()
            .is_some_and(|subs| subs.contains(i)))
    }

    /// Read stored bit `i`.
    pub fn get_bit(&self, i: usize) -> Result<bool> {
        self.store.get(i)
    }

    /// Copy with stored bit `i` toggled. Placeholders are kept, so toggling a
    /// placeholder complements its whole range.
    pub fn with_bit_flipped(&self, i: usize) -> Result<Self> {
        let mut out = self.clone();
        out.store.flip(i)?;
        Ok(out)
    }

    /// Copy with every listed stored position toggled.
    pub fn with_bits_flipped(&self, positions: &[usize]) -> Result<Self> {
        let mut out = self.clone();
        for &pos in positions {
            out.store.flip(pos)?;
        }
        Ok(out)
    }

    /// Set bits among the stored bits.
    pub fn number_of_ones(&self) -> usize {
        self.store.count_ones()
    }

    /// Clear bits among the stored bits.
    pub fn number_of_zeros(&self) -> usize {
        self.store.count_zeros()
    }

    /// Packed stored bytes; placeholders are exported as single bits.
    pub fn to_byte_array(&self) -> Vec<u8> {
        self.store.to_byte_array()
    }

    /// Stored bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.store.len()).map(move |i| self.store.bit(i))
    }

    /// Positions of the stored set bits in increasing order.
    pub fn ones_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.store.len()).filter(move |&i| self.store.bit(i))
    }

    /// Fully expanded content, borrowed when nothing is contracted.
    pub(crate) fn logical(&self) -> Cow<'_, BitStore> {
        match &self.substitutions {
            Some(subs) => Cow::Owned(subs.expand(&self.store)),
            None => Cow::Borrowed(&self.store),
        }
    }

    pub(crate) fn require_plain(&self, operation: &'static str) -> Result<()> {
        if self.is_contracted() {
            Err(BitError::UnsupportedOnCompressedSequence(operation))
        } else {
            Ok(())
        }
    }
}

impl PartialEq for BitSequence {
    fn eq(&self, other: &Self) -> bool {
        if self.length() != other.length() {
            return false;
        }
        self.logical() == other.logical()
    }
}

impl Eq for BitSequence {}

impl Ord for BitSequence {
    /// Shorter sequences sort first; equal lengths compare bit by bit.
    fn cmp(&self, other: &Self) -> Ordering {
        self.length().cmp(&other.length()).then_with(|| {
            self.logical()
                .as_bytes()
                .cmp(other.logical().as_bytes())
        })
    }
}

impl PartialOrd for BitSequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for BitSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.logical().hash(state);
    }
}

impl FromStr for BitSequence {
    type Err = BitError;

    /// Parse `'0'`/`'1'` characters; `'|'` byte separators are skipped.
    fn from_str(text: &str) -> Result<Self> {
        let mut buf = BitBuffer::with_capacity(text.len());
        for (position, found) in text.chars().enumerate() {
            match found {
                '0' => buf.push(false),
                '1' => buf.push(true),
                '|' => {}
                _ => return Err(BitError::Parse { position, found }),
            }
        }
        Ok(Self::from_store(buf.finish()?))
    }
}

impl fmt::Display for BitSequence {
    /// `[<bits grouped by byte>] (<nbits>;<nbytes>[;c])`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.store.len() {
            if i > 0 && i % 8 == 0 {
                f.write_str("|")?;
            }
            f.write_str(if self.store.bit(i) { "1" } else { "0" })?;
        }
        write!(
            f,
            "] ({};{}",
            self.store.len(),
            self.store.byte_len()
        )?;
        if self.is_contracted() {
            f.write_str(";c")?;
        }
        f.write_str(")")
    }
}

/// Unchecked wire form of a [`BitSequence`].
///
/// The store fields are spelled out rather than flattened so that the
/// integer map keys inside `substitutions` reach their own deserializer.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBitSequence {
    size: usize,
    bytes: Vec<u8>,
    substitutions: Option<Substitutions>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBitSequence> for BitSequence {
    type Error = BitError;

    fn try_from(raw: RawBitSequence) -> Result<Self> {
        let store = BitStore::try_from(RawBitStore {
            size: raw.size,
            bytes: raw.bytes,
        })?;
        if let Some(last) = raw.substitutions.as_ref().and_then(|s| s.last_position()) {
            BitError::check_index(last, store.len())?;
        }
        Ok(Self::from_parts(store, raw.substitutions))
    }
}
