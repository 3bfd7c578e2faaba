//! Randomized variation operators used by search drivers.
//!
//! All of them work on plain (uncontracted) sequences and take the random
//! source explicitly, so a seeded generator reproduces a run exactly.

use rand::seq::index;
use rand::Rng;

use crate::bits::store::BitBuffer;
use crate::bits::{BitSequence, BitStore};
use crate::error::{BitError, Result};

impl BitSequence {
    /// Keep exactly `k` of the set bits of `self`, chosen uniformly.
    ///
    /// Treats `self` as a mask; the result is a sub-mask with `k` ones.
    pub fn with_control_count<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Result<Self> {
        self.require_plain("with_control_count")?;
        let ones = self.store.count_ones();
        if k > ones {
            return Err(BitError::invalid(format!(
                "cannot keep {} of {} set bits",
                k, ones
            )));
        }
        let mut store = BitStore::zeros(self.store.len())?;
        for rank in index::sample(rng, ones, k) {
            if let Some(pos) = self.store.select1(rank) {
                store.assign(pos, true);
            }
        }
        Ok(Self::from_store(store))
    }

    /// Uniform random permutation of the bits.
    ///
    /// Redrawn until the result differs from `self`, unless every bit has
    /// the same value, in which case a copy is returned.
    pub fn shuffle<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self> {
        self.require_plain("shuffle")?;
        if self.store.is_constant() {
            return Ok(self.clone());
        }
        let size = self.store.len();
        let ones = self.store.count_ones();
        loop {
            let mut store = BitStore::zeros(size)?;
            for pos in index::sample(rng, size, ones) {
                store.assign(pos, true);
            }
            if store != self.store {
                return Ok(Self::from_store(store));
            }
        }
    }

    /// Multi-parent crossover.
    ///
    /// Draws `parents.len() - 1` distinct pivots in `[0, m)`, sorts them, and
    /// takes segment `i` (between consecutive pivots) from parent `i`.
    pub fn crossover<R: Rng + ?Sized>(parents: &[Self], rng: &mut R) -> Result<Self> {
        if parents.len() < 2 {
            return Err(BitError::invalid(format!(
                "crossover needs at least two parents, got {}",
                parents.len()
            )));
        }
        let m = parents[0].store.len();
        for parent in parents {
            parent.require_plain("crossover")?;
            BitError::check_lengths(m, parent.store.len())?;
        }
        let cuts = parents.len() - 1;
        if cuts > m {
            return Err(BitError::invalid(format!(
                "{} parents need at least {} bits, got {}",
                parents.len(),
                cuts,
                m
            )));
        }

        let mut pivots = index::sample(rng, m, cuts).into_vec();
        pivots.sort_unstable();

        let mut buf = BitBuffer::with_capacity(m);
        let mut start = 0;
        for (parent, end) in parents.iter().zip(pivots.into_iter().chain(Some(m))) {
            buf.extend_range(&parent.store, start, end);
            start = end;
        }
        Ok(Self::from_store(buf.finish()?))
    }

    /// Move toward `target` by flipping a `speed` fraction of the differing
    /// bits, chosen uniformly.
    ///
    /// `speed == 0` returns `self`, `speed == 1` returns `target`; otherwise
    /// `round(speed * d)` of the `d` differing bits are flipped.
    pub fn attract<R: Rng + ?Sized>(&self, target: &Self, speed: f64, rng: &mut R) -> Result<Self> {
        if !(0.0..=1.0).contains(&speed) {
            return Err(BitError::invalid(format!(
                "speed must be in [0, 1], got {}",
                speed
            )));
        }
        self.require_plain("attract")?;
        target.require_plain("attract")?;
        BitError::check_lengths(self.store.len(), target.store.len())?;

        if speed == 0.0 {
            return Ok(self.clone());
        }
        if speed == 1.0 {
            return Ok(target.clone());
        }
        let diff = self.diff(target)?;
        let k = (speed * diff.number_of_ones() as f64).round() as usize;
        let mask = diff.with_control_count(k, rng)?;
        self.xor(&mask)
    }

    /// Move away from `target`: attraction toward its complement.
    pub fn repel<R: Rng + ?Sized>(&self, target: &Self, speed: f64, rng: &mut R) -> Result<Self> {
        self.attract(&target.complement(), speed, rng)
    }
}
