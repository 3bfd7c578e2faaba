//! Structural compression: contraction and expansion of bit ranges.
//!
//! Contracting `[first, last)` replaces the range by a single placeholder
//! bit at `first`. The placeholder starts at 0; on expansion a 0 restores
//! the recorded range verbatim and a 1 restores its complement. Repeated
//! contractions compose, and ranges may swallow earlier placeholders, which
//! then nest inside the new one.
//!
//! ```
//! use bitseq::BitSequence;
//!
//! let mut data: BitSequence = "11111".parse().unwrap();
//! data.contract(1, 5).unwrap();
//! assert_eq!(data.number_of_bits(), 2);
//! assert_eq!(data.length(), 5);
//! assert!(data.is_bit_contracted(1).unwrap());
//!
//! data.uncontract();
//! assert_eq!(data, "11111".parse().unwrap());
//! ```

pub(crate) mod arena;

pub use arena::Substitutions;

use crate::bits::store::BitBuffer;
use crate::bits::BitSequence;
use crate::error::{BitError, Result};

impl BitSequence {
    /// Replace stored bits `[first, last)` by a single placeholder.
    ///
    /// Requires `first < last <= number_of_bits()` and a range of at least two
    /// bits. Positions refer to the current (possibly already shrunk)
    /// sequence.
    pub fn contract(&mut self, first: usize, last: usize) -> Result<()> {
        let size = self.store.len();
        if first >= last || last > size || last - first < 2 {
            return Err(BitError::invalid(format!(
                "cannot contract [{}, {}) of a {}-bit sequence",
                first, last, size
            )));
        }

        let mut buf = BitBuffer::with_capacity(size - (last - first) + 1);
        buf.extend_range(&self.store, 0, first);
        buf.push(false);
        buf.extend_range(&self.store, last, size);

        let mut subs = self.substitutions.take().unwrap_or_default();
        if let Err(err) = subs.contract(&self.store, first, last) {
            self.substitutions = Some(subs).filter(|s| !s.is_empty());
            return Err(err);
        }
        self.store = buf.into_store();
        self.substitutions = Some(subs);

        tracing::trace!(first, last, bits = self.store.len(), "contracted range");
        Ok(())
    }

    /// Expand every placeholder, innermost first, until none remain.
    pub fn uncontract(&mut self) {
        if let Some(subs) = self.substitutions.take() {
            self.store = subs.expand(&self.store);
            tracing::trace!(bits = self.store.len(), "expanded placeholders");
        }
    }

    /// Fully expanded copy; the receiver is left untouched.
    pub fn uncontracted(&self) -> BitSequence {
        BitSequence::from_store(self.logical().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> BitSequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_contract_all_ones_tail() {
        let mut data = seq("11111");
        data.contract(1, 5).unwrap();
        assert_eq!(data.number_of_bits(), 2);
        assert_eq!(data.length(), 5);
        assert!(data.is_bit_contracted(1).unwrap());
        assert!(!data.is_bit_contracted(0).unwrap());
        assert!(data.is_bit_contracted(2).is_err());
        assert_eq!(data.to_string(), "[10] (2;1;c)");
    }

    #[test]
    fn test_contract_rejects_bad_ranges() {
        let mut data = seq("10101");
        assert!(data.contract(2, 3).is_err());
        assert!(data.contract(3, 2).is_err());
        assert!(data.contract(0, 6).is_err());
        assert!(!data.is_contracted());
    }

    #[test]
    fn test_uncontract_restores_content() {
        let original = seq("0110100111010");
        let mut data = original.clone();
        data.contract(3, 7).unwrap();
        data.contract(0, 2).unwrap();
        data.contract(5, 9).unwrap();
        assert_eq!(data.length(), original.length());
        assert_eq!(data, original);

        data.uncontract();
        assert!(!data.is_contracted());
        assert_eq!(data.number_of_bits(), 13);
        assert_eq!(data.store(), original.store());
    }

    #[test]
    fn test_flipped_placeholder_complements_range() {
        let mut data = seq("1100101");
        data.contract(2, 6).unwrap();
        // stored: 1 1 [0] 1 ; range 0010
        let flipped = data.with_bit_flipped(2).unwrap();
        assert_eq!(flipped.uncontracted(), seq("1111011"));
        assert_eq!(data.uncontracted(), seq("1100101"));
    }

    #[test]
    fn test_nested_placeholder_under_flip() {
        let mut data = seq("00011000");
        data.contract(3, 5).unwrap(); // 000[0]000, range 11
        data.contract(2, 5).unwrap(); // 00[0]00, range 0[0]0
        assert_eq!(data.number_of_bits(), 5);
        assert_eq!(data.length(), 8);

        let flipped = data.with_bit_flipped(2).unwrap();
        assert_eq!(flipped.uncontracted(), seq("00100100"));
    }

    #[test]
    fn test_uncontracted_leaves_receiver() {
        let mut data = seq("101100");
        data.contract(0, 3).unwrap();
        let expanded = data.uncontracted();
        assert!(data.is_contracted());
        assert!(!expanded.is_contracted());
        assert_eq!(expanded.number_of_bits(), 6);
    }

    #[test]
    fn test_copies_are_independent() {
        let mut data = seq("111000111");
        data.contract(3, 6).unwrap();
        let copy = data.clone();
        data.contract(0, 3).unwrap();
        assert_eq!(copy.number_of_bits(), 7);
        assert_eq!(copy.substitutions().map(|s| s.len()), Some(1));
        assert_eq!(copy, data);
    }
}
