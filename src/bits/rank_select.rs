//! Rank and select over stored bits.
//!
//! Both operate on the stored (compressed) representation; a placeholder
//! counts as one bit with its own value.

use crate::bits::{BitSequence, BitStore};
use crate::RankSelect;

impl RankSelect for BitStore {
    #[inline]
    fn rank1(&self, i: usize) -> usize {
        BitStore::rank1(self, i)
    }

    #[inline]
    fn select1(&self, k: usize) -> Option<usize> {
        BitStore::select1(self, k)
    }
}

impl RankSelect for BitSequence {
    #[inline]
    fn rank1(&self, i: usize) -> usize {
        self.store.rank1(i)
    }

    #[inline]
    fn select1(&self, k: usize) -> Option<usize> {
        self.store.select1(k)
    }
}

impl BitSequence {
    /// Position of the k-th clear stored bit (0-indexed).
    pub fn select0(&self, k: usize) -> Option<usize> {
        self.store.select0(k)
    }
}
