use bytemuck::{Pod, Zeroable};
use indicatif::ProgressBar;
use std::fmt;

// -------------------------------------------------------------------------------------
// Domain bounds
// -------------------------------------------------------------------------------------

/// Largest value a combination may contain (values are 1-based).
pub const DOMAIN_MAX: u8 = 45;
/// Number of distinct values per combination.
pub const PICK: usize = 6;
/// C(45, 6).
pub const COMBINATION_COUNT: usize = binomial(DOMAIN_MAX as u64, PICK as u64) as usize;

/// Binomial coefficient C(n, k); 0 when k > n.
pub const fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = if k > n - k { n - k } else { k };
    let mut acc = 1u64;
    let mut i = 0;
    // C(n, i+1) = C(n, i) * (n-i) / (i+1) is exact at every step
    while i < k {
        acc = acc * (n - i) / (i + 1);
        i += 1;
    }
    acc
}

// -------------------------------------------------------------------------------------
// Combination record
// -------------------------------------------------------------------------------------

/// One 6-of-45 combination, values strictly increasing.
///
/// Laid out as six bytes with no padding so a `&[Combination]` can be written
/// to disk as-is. Ordering is lexicographic over the values, which is also the
/// canonical enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Combination(pub [u8; PICK]);

impl Combination {
    #[inline]
    pub fn values(&self) -> &[u8; PICK] {
        &self.0
    }

    /// Strictly increasing and every value within `1..=DOMAIN_MAX`.
    pub fn is_valid(&self) -> bool {
        let v = &self.0;
        v[0] >= 1 && v[PICK - 1] <= DOMAIN_MAX && v.windows(2).all(|w| w[0] < w[1])
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "[{a}, {b}, {c}, {d}, {e}, {g}]")
    }
}

// -------------------------------------------------------------------------------------
// Enumeration
// -------------------------------------------------------------------------------------

/// Every K-subset of `1..=n` as an increasing tuple, in lexicographic order.
pub fn enumerate<const K: usize>(n: u8) -> Vec<[u8; K]> {
    enumerate_with_progress(n, &ProgressBar::hidden())
}

/// Same as [`enumerate`], ticking `pb` once per leading value.
///
/// Iterative next-combination stepping: advance the rightmost position that
/// still has room (`cur[i] < n - (K-1-i)`), then reset everything to its right
/// to the tightest increasing run. The output is pre-sized to exactly C(n, K).
pub fn enumerate_with_progress<const K: usize>(n: u8, pb: &ProgressBar) -> Vec<[u8; K]> {
    let total = binomial(n as u64, K as u64) as usize;
    let mut out = Vec::with_capacity(total);
    if K > n as usize {
        return out;
    }
    pb.set_length((n as usize + 1 - K.max(1)) as u64);

    let mut cur = [0u8; K];
    for (i, v) in cur.iter_mut().enumerate() {
        *v = i as u8 + 1;
    }

    loop {
        out.push(cur);

        let mut i = K;
        loop {
            if i == 0 {
                pb.inc(1);
                debug_assert_eq!(out.len(), total);
                return out;
            }
            i -= 1;
            if cur[i] < n - (K - 1 - i) as u8 {
                break;
            }
        }

        if i == 0 {
            pb.inc(1);
        }
        cur[i] += 1;
        for j in i + 1..K {
            cur[j] = cur[j - 1] + 1;
        }
    }
}

/// The full 6-of-45 domain in canonical order.
pub fn enumerate_all(pb: &ProgressBar) -> Vec<Combination> {
    enumerate_with_progress::<PICK>(DOMAIN_MAX, pb)
        .into_iter()
        .map(Combination)
        .collect()
}

// -------------------------------------------------------------------------------------
// Ranking
// -------------------------------------------------------------------------------------

/// Position of an increasing K-subset of `1..=n` in lexicographic order.
///
/// For each position, every smaller candidate value `s` that was skipped
/// accounts for the C(n-s, K-1-i) subsets sharing the prefix up to `s`.
/// Input must be strictly increasing and within range.
pub fn rank_in<const K: usize>(n: u8, values: &[u8; K]) -> usize {
    let mut r = 0u64;
    let mut prev = 0u8;
    for (i, &v) in values.iter().enumerate() {
        let remaining = (K - 1 - i) as u64;
        for skipped in prev + 1..v {
            r += binomial((n - skipped) as u64, remaining);
        }
        prev = v;
    }
    r as usize
}

/// Index of `combo` in `combos.bin` and in every aligned stat file.
#[inline]
pub fn rank(combo: &Combination) -> usize {
    rank_in(DOMAIN_MAX, &combo.0)
}
