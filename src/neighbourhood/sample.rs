//! Random sampling inside Hamming neighbourhoods.
//!
//! Distances are logical: flipping a placeholder changes every bit of the
//! range it stands for, so it counts for the range's logical length.
//!
//! When an exact flip count cannot be met the samplers degrade to the
//! closest achievable result instead of failing; those cases are reported
//! through `tracing` at debug level.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::bits::BitSequence;
use crate::error::{BitError, Result};

impl BitSequence {
    /// Random sequence at logical distance in `[lower, upper]`.
    ///
    /// A target distance is drawn uniformly from the range. One placeholder
    /// whose weight fits under the target may be flipped first (picked in
    /// random order); the remainder is made of distinct plain-bit flips.
    /// When fewer plain bits are available than the remainder requires, all
    /// of them are flipped and the result lands closer than requested.
    pub fn random_select_in_neighbourhood<R: Rng + ?Sized>(
        &self,
        lower: usize,
        upper: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let length = self.length();
        if lower == 0 || lower > upper || upper > length {
            return Err(BitError::invalid(format!(
                "radii [{}, {}] invalid for length {}",
                lower, upper, length
            )));
        }
        let target = rng.gen_range(lower..=upper);
        let mut remaining = target;
        let mut flips = Vec::with_capacity(target);

        if let Some(subs) = &self.substitutions {
            let mut keys: Vec<usize> = subs.positions().collect();
            keys.shuffle(rng);
            let eligible = keys.into_iter().find_map(|key| {
                subs.weight(key)
                    .filter(|&weight| weight <= remaining)
                    .map(|weight| (key, weight))
            });
            if let Some((key, weight)) = eligible {
                flips.push(key);
                remaining -= weight;
            }
        }

        let plain: Vec<usize> = (0..self.number_of_bits())
            .filter(|&i| !self.substitutions.as_ref().is_some_and(|s| s.contains(i)))
            .collect();
        if remaining > plain.len() {
            tracing::debug!(
                target_distance = target,
                available = plain.len(),
                missing = remaining - plain.len(),
                "not enough plain bits, flipping all of them"
            );
            remaining = plain.len();
        }
        flips.extend(index::sample(rng, plain.len(), remaining).into_iter().map(|i| plain[i]));

        self.with_bits_flipped(&flips)
    }

    /// Random sequence at logical distance in `[1, upper]`.
    pub fn random_select_within<R: Rng + ?Sized>(&self, upper: usize, rng: &mut R) -> Result<Self> {
        self.random_select_in_neighbourhood(1, upper, rng)
    }

    /// Neighbourhood sampling restricted to some windows.
    ///
    /// The stored bits are split into `windows` equal windows; only the
    /// windows listed in `selected` may change. The selected windows are
    /// concatenated, sampled with
    /// [`random_select_in_neighbourhood`](Self::random_select_in_neighbourhood),
    /// and spliced back in place.
    pub fn random_select_in_windows<R: Rng + ?Sized>(
        &self,
        lower: usize,
        upper: usize,
        windows: usize,
        selected: &[usize],
        rng: &mut R,
    ) -> Result<Self> {
        let size = self.number_of_bits();
        if windows == 0 || size % windows != 0 {
            return Err(BitError::invalid(format!(
                "{} bits cannot be split into {} equal windows",
                size, windows
            )));
        }
        let mut chosen = selected.to_vec();
        chosen.sort_unstable();
        chosen.dedup();
        if chosen.is_empty() || chosen.len() != selected.len() {
            return Err(BitError::invalid(
                "selected windows must be a non-empty set of distinct indices",
            ));
        }
        if let Some(&last) = chosen.last() {
            BitError::check_index(last, windows)?;
        }

        let width = size / windows;
        let window = |data: &Self, w: usize| data.slice(w * width, (w + 1) * width);

        let pieces = chosen
            .iter()
            .map(|&w| window(self, w))
            .collect::<Result<Vec<_>>>()?;
        let sampled = Self::concat_all(&pieces)?.random_select_in_neighbourhood(lower, upper, rng)?;

        let mut next = 0;
        let mut spliced = Vec::with_capacity(windows);
        for w in 0..windows {
            if chosen.get(next) == Some(&w) {
                spliced.push(window(&sampled, next)?);
                next += 1;
            } else {
                spliced.push(window(self, w)?);
            }
        }
        Self::concat_all(&spliced)
    }

    /// Random sequence at distance `h` from one of `refs`, preferring bits on
    /// which the references disagree.
    ///
    /// The free bits are the union of all pairwise differences between the
    /// references. With more than `h` free bits, exactly `h` of them are
    /// flipped; otherwise all free bits are flipped and the shortfall is
    /// made up from bits on which every reference agrees. The mask is
    /// applied to a randomly chosen reference, so the result is at distance
    /// `h` from that reference but only approximately positioned relative to
    /// the others.
    pub fn random_select_at_distance_from<R: Rng + ?Sized>(
        h: usize,
        refs: &[Self],
        rng: &mut R,
    ) -> Result<Self> {
        let first = refs
            .first()
            .ok_or_else(|| BitError::invalid("at least one reference is required"))?;
        let size = first.number_of_bits();
        for r in refs {
            r.require_plain("random_select_at_distance_from")?;
            BitError::check_lengths(size, r.number_of_bits())?;
        }
        if h > size {
            return Err(BitError::invalid(format!(
                "distance {} exceeds length {}",
                h, size
            )));
        }

        let mut free = Self::zeros(size)?;
        for (i, a) in refs.iter().enumerate() {
            for b in &refs[i + 1..] {
                free = free.or(&a.xor(b)?)?;
            }
        }

        let budget = free.number_of_ones();
        let mask = if budget > h {
            free.with_control_count(h, rng)?
        } else {
            if budget < h {
                tracing::debug!(
                    distance = h,
                    free_bits = budget,
                    "forcing flips on bits shared by all references"
                );
            }
            let forced = free.complement().with_control_count(h - budget, rng)?;
            free.or(&forced)?
        };

        let base = &refs[rng.gen_range(0..refs.len())];
        base.xor(&mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seq(text: &str) -> BitSequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_exact_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let data = seq("0110100111");
        for _ in 0..100 {
            let n = data.random_select_in_neighbourhood(2, 2, &mut rng).unwrap();
            assert_eq!(n.hamming_distance_to(&data).unwrap(), 2);
        }
    }

    #[test]
    fn test_radius_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let data = BitSequence::zeros(32).unwrap();
        for _ in 0..100 {
            let n = data.random_select_in_neighbourhood(3, 6, &mut rng).unwrap();
            let d = n.hamming_distance_to(&data).unwrap();
            assert!((3..=6).contains(&d), "d={}", d);
        }
        let n = data.random_select_within(1, &mut rng).unwrap();
        assert_eq!(n.number_of_ones(), 1);
    }

    #[test]
    fn test_invalid_radii() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let data = seq("0101");
        assert!(data.random_select_in_neighbourhood(0, 2, &mut rng).is_err());
        assert!(data.random_select_in_neighbourhood(3, 2, &mut rng).is_err());
        assert!(data.random_select_in_neighbourhood(1, 5, &mut rng).is_err());
    }

    #[test]
    fn test_placeholder_weight_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut data = seq("0000000000");
        data.contract(0, 8).unwrap(); // [0]00
        for _ in 0..50 {
            let n = data.random_select_in_neighbourhood(1, 10, &mut rng).unwrap();
            let d = n.hamming_distance_to(&data).unwrap();
            assert!((1..=10).contains(&d), "d={}", d);
            assert!(n.is_bit_contracted(0).unwrap());
        }
    }

    #[test]
    fn test_degrades_when_plain_bits_run_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let mut data = seq("000000");
        data.contract(0, 5).unwrap(); // [0]0: weight 5, one plain bit
        // target 3: placeholder too heavy, only one plain bit to flip
        let n = data.random_select_in_neighbourhood(3, 3, &mut rng).unwrap();
        assert_eq!(n.hamming_distance_to(&data).unwrap(), 1);
    }

    #[test]
    fn test_windows() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let data = BitSequence::zeros(12).unwrap();
        for _ in 0..50 {
            let n = data
                .random_select_in_windows(2, 2, 3, &[0, 2], &mut rng)
                .unwrap();
            assert_eq!(n.number_of_ones(), 2);
            assert_eq!(n.slice(4, 8).unwrap(), BitSequence::zeros(4).unwrap());
        }
        assert!(data
            .random_select_in_windows(1, 1, 5, &[0], &mut rng)
            .is_err());
        assert!(data
            .random_select_in_windows(1, 1, 3, &[3], &mut rng)
            .is_err());
        assert!(data
            .random_select_in_windows(1, 1, 3, &[1, 1], &mut rng)
            .is_err());
        assert!(data
            .random_select_in_windows(5, 5, 3, &[1], &mut rng)
            .is_err());
    }

    #[test]
    fn test_windows_keep_placeholders() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut data = seq("0000111100000000");
        data.contract(4, 8).unwrap(); // 13 stored bits -> not divisible by 2
        assert!(data
            .random_select_in_windows(1, 1, 2, &[0], &mut rng)
            .is_err());

        let mut data = seq("00001111000000");
        data.contract(4, 8).unwrap(); // 11 stored bits
        let data = data.concat(&seq("0"));
        let n = data
            .random_select_in_windows(1, 1, 2, &[1], &mut rng)
            .unwrap();
        assert!(n.is_bit_contracted(4).unwrap());
        assert_eq!(n.slice(0, 6).unwrap(), data.slice(0, 6).unwrap());
    }

    #[test]
    fn test_distance_from_references() {
        let mut rng = ChaCha8Rng::seed_from_u64(18);
        let refs = vec![seq("00000000"), seq("00001111")];
        for h in 0..=8 {
            let n = BitSequence::random_select_at_distance_from(h, &refs, &mut rng).unwrap();
            let d0 = n.hamming_distance_to(&refs[0]).unwrap();
            let d1 = n.hamming_distance_to(&refs[1]).unwrap();
            assert!(d0 == h || d1 == h, "h={} d0={} d1={}", h, d0, d1);
            if h < 4 {
                // only free bits (the last four) move
                assert_eq!(n.slice(0, 4).unwrap(), seq("0000"));
            }
        }
        assert!(BitSequence::random_select_at_distance_from(9, &refs, &mut rng).is_err());
        assert!(BitSequence::random_select_at_distance_from(1, &[], &mut rng).is_err());
    }
}
