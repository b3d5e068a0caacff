use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::enumeration::Combination;

/// Records handed to one rayon job.
pub const CHUNK: usize = 1 << 16;

/// Inclusive upper bound of the low tier.
pub const LOW_MAX: u8 = 15;
/// Inclusive upper bound of the mid tier; anything above is high.
pub const MID_MAX: u8 = 30;

/// How many values of a combination fall into each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierCounts {
    pub low: u8,
    pub mid: u8,
    pub high: u8,
}

impl TierCounts {
    pub fn from_values(values: &[u8]) -> Self {
        let mut t = TierCounts::default();
        for &v in values {
            if v <= LOW_MAX {
                t.low += 1;
            } else if v <= MID_MAX {
                t.mid += 1;
            } else {
                t.high += 1;
            }
        }
        t
    }

    /// Legacy `tier.bin` byte: `(low << 4) | (mid << 2) | high`.
    ///
    /// The fields are nominally two bits wide but each count can reach 6, so
    /// `mid` and `high` bleed into their neighbours and the byte is not
    /// injective: `{low 1, mid 0, high 5}` and `{low 0, mid 5, high 1}` both
    /// pack to `0x15`. Consumers that need the counts should recompute them
    /// from `combos.bin` rather than decode this byte.
    #[inline]
    pub fn pack(self) -> u8 {
        (self.low << 4) | (self.mid << 2) | self.high
    }
}

/// Derived features of one combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Count of odd values, 0..=6.
    pub parity: u8,
    /// Plain sum, 21..=255.
    pub sum: u16,
    pub tiers: TierCounts,
}

impl Features {
    pub fn of(combo: &Combination) -> Self {
        let values = combo.values();
        let parity = values.iter().filter(|&&v| v & 1 == 1).count() as u8;
        let sum = values.iter().map(|&v| v as u16).sum();
        Features {
            parity,
            sum,
            tiers: TierCounts::from_values(values),
        }
    }

    #[inline]
    pub fn tier(&self) -> u8 {
        self.tiers.pack()
    }
}

/// The three derived columns, index-aligned with the combination array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatColumns {
    pub parity: Vec<u8>,
    pub sum: Vec<u16>,
    pub tier: Vec<u8>,
}

impl StatColumns {
    pub fn len(&self) -> usize {
        self.parity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parity.is_empty()
    }

    pub fn compute(combos: &[Combination]) -> Self {
        Self::compute_with_progress(combos, &ProgressBar::hidden())
    }

    /// Fills pre-sized columns in parallel.
    ///
    /// The input and all three outputs are cut at the same `CHUNK` boundaries,
    /// so each job reads one input chunk and owns the matching output chunks.
    pub fn compute_with_progress(combos: &[Combination], pb: &ProgressBar) -> Self {
        let n = combos.len();
        let mut cols = StatColumns {
            parity: vec![0; n],
            sum: vec![0; n],
            tier: vec![0; n],
        };
        pb.set_length(n as u64);

        combos
            .par_chunks(CHUNK)
            .zip(cols.parity.par_chunks_mut(CHUNK))
            .zip(cols.sum.par_chunks_mut(CHUNK))
            .zip(cols.tier.par_chunks_mut(CHUNK))
            .for_each(|(((src, parity), sum), tier)| {
                for (i, combo) in src.iter().enumerate() {
                    let f = Features::of(combo);
                    parity[i] = f.parity;
                    sum[i] = f.sum;
                    tier[i] = f.tier();
                }
                pb.inc(src.len() as u64);
            });

        cols
    }

    pub fn get(&self, idx: usize) -> Option<(u8, u16, u8)> {
        Some((
            *self.parity.get(idx)?,
            *self.sum.get(idx)?,
            *self.tier.get(idx)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::{COMBINATION_COUNT, enumerate_all};

    #[test]
    fn reference_combination() {
        let f = Features::of(&Combination([1, 2, 3, 4, 5, 45]));
        assert_eq!(f.parity, 4);
        assert_eq!(f.sum, 60);
        assert_eq!(f.tiers, TierCounts { low: 5, mid: 0, high: 1 });
        assert_eq!(f.tier(), 0x51);
    }

    #[test]
    fn extremes() {
        let lo = Features::of(&Combination([1, 2, 3, 4, 5, 6]));
        assert_eq!(lo.sum, 21);
        assert_eq!(lo.parity, 3);
        assert_eq!(lo.tiers, TierCounts { low: 6, mid: 0, high: 0 });
        assert_eq!(lo.tier(), 0x60);

        let hi = Features::of(&Combination([40, 41, 42, 43, 44, 45]));
        assert_eq!(hi.sum, 255);
        assert_eq!(hi.parity, 3);
        assert_eq!(hi.tiers, TierCounts { low: 0, mid: 0, high: 6 });
        assert_eq!(hi.tier(), 6);

        let odd = Features::of(&Combination([1, 3, 5, 7, 9, 11]));
        assert_eq!(odd.parity, 6);
        let even = Features::of(&Combination([2, 4, 6, 8, 10, 12]));
        assert_eq!(even.parity, 0);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        let t = TierCounts::from_values(&[15, 16, 30, 31, 1, 45]);
        assert_eq!(t, TierCounts { low: 2, mid: 2, high: 2 });
        assert_eq!(t.pack(), (2 << 4) | (2 << 2) | 2);
    }

    #[test]
    fn legacy_packing_collides() {
        let a = TierCounts { low: 1, mid: 0, high: 5 };
        let b = TierCounts { low: 0, mid: 5, high: 1 };
        assert_ne!(a, b);
        assert_eq!(a.pack(), 0x15);
        assert_eq!(a.pack(), b.pack());
    }

    #[test]
    fn columns_align_with_input() {
        let combos = enumerate_all(&ProgressBar::hidden());
        let pb = ProgressBar::hidden();
        let cols = StatColumns::compute_with_progress(&combos, &pb);
        assert_eq!(cols.len(), COMBINATION_COUNT);
        assert_eq!(cols.sum.len(), COMBINATION_COUNT);
        assert_eq!(cols.tier.len(), COMBINATION_COUNT);
        assert_eq!(pb.position(), COMBINATION_COUNT as u64);

        for (i, c) in combos.iter().enumerate() {
            let f = Features::of(c);
            assert_eq!(cols.get(i), Some((f.parity, f.sum, f.tier())));
            assert_eq!(f.tiers.low + f.tiers.mid + f.tiers.high, 6);
            assert!((21..=255).contains(&f.sum));
        }
        assert_eq!(cols.get(COMBINATION_COUNT), None);
    }

    #[test]
    fn parallel_result_is_deterministic() {
        let combos = enumerate_all(&ProgressBar::hidden());
        let a = StatColumns::compute(&combos[..200_000]);
        let b = StatColumns::compute(&combos[..200_000]);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input() {
        let cols = StatColumns::compute(&[]);
        assert!(cols.is_empty());
    }
}
