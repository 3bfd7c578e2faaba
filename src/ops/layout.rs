//! Slicing, concatenation and shifting.
//!
//! Positions are stored positions. Placeholders travel with their bits:
//! slicing keeps those inside the range, concatenation offsets the right
//! operand's placeholders by the left operand's stored size.

use crate::bits::store::BitBuffer;
use crate::bits::BitSequence;
use crate::contract::Substitutions;
use crate::error::{BitError, Result};

impl BitSequence {
    /// Stored bits `[first, last)`.
    pub fn slice(&self, first: usize, last: usize) -> Result<Self> {
        let store = self.store.slice(first, last)?;
        let substitutions = self
            .substitutions
            .as_ref()
            .and_then(|subs| subs.slice(first, last));
        Ok(Self::from_parts(store, substitutions))
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let store = self.store.concat(&other.store);
        let substitutions = match (&self.substitutions, &other.substitutions) {
            (None, None) => None,
            (left, right) => {
                let mut subs = left.clone().unwrap_or_default();
                if let Some(right) = right {
                    subs.append(right, self.store.len());
                }
                Some(subs)
            }
        };
        Self::from_parts(store, substitutions)
    }

    /// Concatenate a non-empty list of sequences in order.
    pub fn concat_all(parts: &[Self]) -> Result<Self> {
        let (head, rest) = parts
            .split_first()
            .ok_or_else(|| BitError::invalid("cannot concatenate an empty list"))?;
        let mut store = head.store.clone();
        let mut substitutions: Option<Substitutions> = head.substitutions.clone();
        for part in rest {
            if let Some(subs) = &part.substitutions {
                substitutions
                    .get_or_insert_with(Substitutions::default)
                    .append(subs, store.len());
            }
            store.append(&part.store);
        }
        Ok(Self::from_parts(store, substitutions))
    }

    /// Shift by `k` positions, filling vacated bits with zero.
    ///
    /// Positive `k` moves bits toward higher indices. `k == 0` and
    /// `|k| == number_of_bits()` return an unchanged copy; larger shifts fail.
    pub fn shift(&self, k: isize) -> Result<Self> {
        self.require_plain("shift")?;
        let size = self.store.len();
        let amount = k.unsigned_abs();
        if amount > size {
            return Err(BitError::invalid(format!(
                "cannot shift a {}-bit sequence by {}",
                size, k
            )));
        }
        if amount == 0 || amount == size {
            return Ok(self.clone());
        }

        let mut buf = BitBuffer::with_capacity(size);
        if k > 0 {
            for _ in 0..amount {
                buf.push(false);
            }
            buf.extend_range(&self.store, 0, size - amount);
        } else {
            buf.extend_range(&self.store, amount, size);
            for _ in 0..amount {
                buf.push(false);
            }
        }
        Ok(Self::from_store(buf.finish()?))
    }
}
