//! Exhaustive enumeration of the sequences at a fixed flip count.
//!
//! `r` cursors over the same sequence hold the `r` positions to flip. Each
//! step advances them to the next `r`-subset of stored positions in
//! colexicographic order, which is the order of the combinatorial number
//! system: the lowest cursor that can move right moves one step and every
//! cursor below it returns to its leftmost slot.

use std::ptr;

use crate::bits::{BitCursor, BitSequence, CursorState};
use crate::error::{BitError, Result};

impl BitSequence {
    /// Advance `cursors` to the next position set and return the sequence
    /// with those stored bits flipped.
    ///
    /// Positions are stored positions: a placeholder is one position and
    /// flips its whole range. Fresh cursors (all before the start) begin the
    /// enumeration at positions `0..r`. Cursors left by a previous call continue it. Once
    /// every subset has been produced the cursors move after the end and
    /// `None` is returned; resetting them restarts the enumeration.
    ///
    /// ```
    /// use bitseq::{BitCursor, BitSequence};
    ///
    /// let data: BitSequence = "000".parse().unwrap();
    /// let mut cursors = [BitCursor::new(&data), BitCursor::new(&data)];
    /// let mut seen = Vec::new();
    /// while let Some(n) = BitSequence::next_neighbour(&mut cursors).unwrap() {
    ///     seen.push(n.to_string());
    /// }
    /// assert_eq!(seen, ["[110] (3;1)", "[101] (3;1)", "[011] (3;1)"]);
    /// ```
    pub fn next_neighbour(cursors: &mut [BitCursor<'_>]) -> Result<Option<BitSequence>> {
        let data = match cursors.first() {
            Some(cursor) => cursor.data(),
            None => return Err(BitError::invalid("at least one cursor is required")),
        };
        if cursors.iter().any(|c| !ptr::eq(c.data(), data)) {
            return Err(BitError::InvalidOperation(
                "cursors walk different sequences".into(),
            ));
        }
        let size = data.number_of_bits();
        let r = cursors.len();
        if r > size {
            return Err(BitError::invalid(format!(
                "cannot choose {} of {} positions",
                r, size
            )));
        }

        let states: Vec<CursorState> = cursors.iter().map(|c| c.state()).collect();
        let positions = if states.iter().all(|s| *s == CursorState::BeforeStart) {
            (0..r).collect::<Vec<_>>()
        } else if states.iter().all(|s| *s == CursorState::AfterEnd) {
            return Ok(None);
        } else {
            let mut positions = cursors
                .iter()
                .map(|c| c.position())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    BitError::InvalidOperation(
                        "cursors mix fresh, exhausted and positioned states".into(),
                    )
                })?;
            if positions.windows(2).any(|w| w[0] >= w[1]) {
                return Err(BitError::InvalidOperation(
                    "cursor positions must be strictly increasing".into(),
                ));
            }
            if !advance(&mut positions, size) {
                for cursor in cursors.iter_mut() {
                    cursor.set_to_end();
                }
                return Ok(None);
            }
            positions
        };

        for (cursor, &pos) in cursors.iter_mut().zip(&positions) {
            cursor.set_state(CursorState::At(pos));
        }
        data.with_bits_flipped(&positions).map(Some)
    }

    /// Iterator over every sequence obtained by flipping exactly `r` stored
    /// bits, in the order of [`next_neighbour`](Self::next_neighbour).
    ///
    /// It yields `C(number_of_bits, r)` items. On a contracted sequence this
    /// is fewer than [`number_of_data_on_circle`](Self::number_of_data_on_circle),
    /// which counts over the logical length.
    pub fn neighbours(&self, r: usize) -> Result<Neighbours<'_>> {
        if r == 0 || r > self.number_of_bits() {
            return Err(BitError::invalid(format!(
                "radius {} invalid for {} stored bits",
                r,
                self.number_of_bits()
            )));
        }
        Ok(Neighbours {
            cursors: vec![BitCursor::new(self); r],
        })
    }
}

/// Next colexicographic subset; false once `positions` is the last one.
fn advance(positions: &mut [usize], size: usize) -> bool {
    let r = positions.len();
    for j in 0..r {
        let limit = if j + 1 < r { positions[j + 1] } else { size };
        if positions[j] + 1 < limit {
            positions[j] += 1;
            for (i, p) in positions[..j].iter_mut().enumerate() {
                *p = i;
            }
            return true;
        }
    }
    false
}

/// Lazy, restartable enumeration created by [`BitSequence::neighbours`].
#[derive(Clone, Debug)]
pub struct Neighbours<'a> {
    cursors: Vec<BitCursor<'a>>,
}

impl<'a> Neighbours<'a> {
    /// Restart from the first subset.
    pub fn reset(&mut self) {
        for cursor in &mut self.cursors {
            cursor.reset();
        }
    }

    /// Positions flipped in the most recently returned sequence.
    pub fn positions(&self) -> Vec<usize> {
        self.cursors.iter().filter_map(|c| c.position()).collect()
    }
}

impl<'a> Iterator for Neighbours<'a> {
    type Item = BitSequence;

    fn next(&mut self) -> Option<BitSequence> {
        // cursors share one sequence and r was checked on construction
        BitSequence::next_neighbour(&mut self.cursors)
            .ok()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> BitSequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_single_cursor_walks_every_bit() {
        let data = seq("0000");
        let all: Vec<_> = data.neighbours(1).unwrap().collect();
        assert_eq!(
            all,
            vec![seq("1000"), seq("0100"), seq("0010"), seq("0001")]
        );
    }

    #[test]
    fn test_colex_order() {
        let data = BitSequence::zeros(4).unwrap();
        let mut it = data.neighbours(2).unwrap();
        let mut order = Vec::new();
        while it.next().is_some() {
            order.push(it.positions());
        }
        assert_eq!(
            order,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![1, 2],
                vec![0, 3],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_count_matches_binomial() {
        let data = seq("0110100110");
        for r in 1..=10 {
            let produced = data.neighbours(r).unwrap().count();
            let expected = data.number_of_data_on_circle(r).unwrap();
            assert_eq!(num_bigint::BigUint::from(produced), expected, "r={}", r);
        }
        for n in data.neighbours(3).unwrap() {
            assert_eq!(n.hamming_distance_to(&data).unwrap(), 3);
        }
    }

    #[test]
    fn test_exhaustion_and_restart() {
        let data = seq("01");
        let mut it = data.neighbours(2).unwrap();
        assert_eq!(it.next(), Some(seq("10")));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        it.reset();
        assert_eq!(it.next(), Some(seq("10")));
    }

    #[test]
    fn test_mixed_states_rejected() {
        let data = seq("0000");
        let mut cursors = [BitCursor::new(&data), BitCursor::new(&data)];
        cursors[1].next().unwrap();
        assert!(matches!(
            BitSequence::next_neighbour(&mut cursors),
            Err(BitError::InvalidOperation(_))
        ));

        let mut cursors = [BitCursor::new(&data), BitCursor::new(&data)];
        cursors[0].next().unwrap();
        cursors[1].next().unwrap();
        // both on bit 0
        assert!(BitSequence::next_neighbour(&mut cursors).is_err());
    }

    #[test]
    fn test_invalid_cursor_sets() {
        let a = seq("000");
        let b = seq("000");
        let mut cursors = [BitCursor::new(&a), BitCursor::new(&b)];
        assert!(BitSequence::next_neighbour(&mut cursors).is_err());
        let mut none: [BitCursor<'_>; 0] = [];
        assert!(BitSequence::next_neighbour(&mut none).is_err());
        let mut too_many = [BitCursor::new(&a); 4];
        assert!(BitSequence::next_neighbour(&mut too_many).is_err());
        assert!(a.neighbours(0).is_err());
        assert!(a.neighbours(4).is_err());
    }

    #[test]
    fn test_placeholders_flip_as_units() {
        let mut data = seq("000000");
        data.contract(1, 5).unwrap(); // 0[0]0
        let distances: Vec<_> = data
            .neighbours(1)
            .unwrap()
            .map(|n| n.hamming_distance_to(&data).unwrap())
            .collect();
        assert_eq!(distances, vec![1, 4, 1]);
    }

    #[test]
    fn test_contracted_count_follows_stored_bits() {
        let mut data = seq("0110100110");
        data.contract(2, 7).unwrap(); // 6 stored bits, length 10
        for r in 1..=6 {
            let produced = num_bigint::BigUint::from(data.neighbours(r).unwrap().count());
            assert_eq!(produced, crate::neighbourhood::binomial(6, r), "r={}", r);
            assert_ne!(produced, data.number_of_data_on_circle(r).unwrap(), "r={}", r);
        }
        assert!(data.neighbours(7).is_err());
    }
}
