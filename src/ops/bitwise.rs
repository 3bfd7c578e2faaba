//! Bitwise combination of sequences.
//!
//! Operands must have the same number of stored bits. At most one operand
//! may carry placeholders; the result inherits them unchanged since these
//! operations never move bits.

use std::ops::Not;

use crate::bits::{BitSequence, BitStore};
use crate::contract::Substitutions;
use crate::error::{BitError, Result};

impl BitSequence {
    /// Bitwise AND.
    pub fn and(&self, other: &Self) -> Result<Self> {
        self.combine(other, BitStore::and)
    }

    /// Bitwise OR.
    pub fn or(&self, other: &Self) -> Result<Self> {
        self.combine(other, BitStore::or)
    }

    /// Bitwise XOR. Padding bits of the result are cleared.
    pub fn xor(&self, other: &Self) -> Result<Self> {
        self.combine(other, BitStore::xor)
    }

    /// Positions where `self` and `other` differ, as a mask.
    pub fn diff(&self, other: &Self) -> Result<Self> {
        self.xor(other)
    }

    /// Complement of every stored bit.
    ///
    /// Placeholders are kept: a toggled placeholder expands to the complement
    /// of its range, so the logical content is complemented too.
    pub fn complement(&self) -> Self {
        Self::from_parts(self.store.not(), self.substitutions.clone())
    }

    fn combine(
        &self,
        other: &Self,
        op: impl Fn(&BitStore, &BitStore) -> Result<BitStore>,
    ) -> Result<Self> {
        let substitutions = inherit(self.substitutions(), other.substitutions())?;
        let store = op(&self.store, &other.store)?;
        Ok(Self::from_parts(store, substitutions))
    }
}

fn inherit(
    left: Option<&Substitutions>,
    right: Option<&Substitutions>,
) -> Result<Option<Substitutions>> {
    match (left, right) {
        (Some(_), Some(_)) => Err(BitError::InvalidOperation(
            "both operands carry placeholders".into(),
        )),
        (Some(s), None) | (None, Some(s)) => Ok(Some(s.clone())),
        (None, None) => Ok(None),
    }
}

impl Not for &BitSequence {
    type Output = BitSequence;

    fn not(self) -> BitSequence {
        self.complement()
    }
}

impl Not for BitSequence {
    type Output = BitSequence;

    fn not(self) -> BitSequence {
        self.complement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> BitSequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_xor_scenario() {
        assert_eq!(seq("1011").xor(&seq("0011")).unwrap(), seq("1000"));
        assert_eq!(seq("1011").diff(&seq("0011")).unwrap(), seq("1000"));
    }

    #[test]
    fn test_laws() {
        let a = seq("1100101011");
        let b = seq("0101110001");
        assert_eq!(a.xor(&b).unwrap().xor(&b).unwrap(), a);
        assert_eq!(!&a.and(&b).unwrap(), (!&a).or(&!&b).unwrap());
        assert_eq!(b.and(&!&b).unwrap(), BitSequence::zeros(10).unwrap());
        assert_eq!(a.or(&!&a).unwrap(), BitSequence::ones(10).unwrap());
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            seq("101").and(&seq("10")),
            Err(BitError::LengthMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn test_placeholders_inherited() {
        let mut a = seq("110011");
        a.contract(2, 4).unwrap();
        let b = seq("00001");
        let c = a.or(&b).unwrap();
        assert!(c.is_bit_contracted(2).unwrap());
        assert_eq!(c.length(), 6);
        assert_eq!(c.uncontracted(), seq("110011"));

        let d = b.xor(&a).unwrap();
        assert!(d.is_contracted());

        let mut e = seq("111111");
        e.contract(0, 2).unwrap();
        assert!(matches!(
            a.and(&e),
            Err(BitError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_complement_of_contracted() {
        let mut a = seq("1100110");
        a.contract(1, 5).unwrap();
        assert_eq!((!&a).uncontracted(), seq("0011001"));
    }
}
