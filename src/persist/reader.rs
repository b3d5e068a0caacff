use anyhow::{Context, Result, bail};
use itertools::Itertools;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

use super::{COMBOS_FILE, ODDEVEN_FILE, SUM_FILE, TIER_FILE};
use crate::enumeration::{COMBINATION_COUNT, Combination, PICK, rank};
use crate::stats::Features;

/// A row joined across the four artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub index: usize,
    pub combo: Combination,
    pub parity: u8,
    pub sum: u16,
    pub tier: u8,
}

/// The four artifacts loaded back into memory.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub combos: Vec<Combination>,
    pub parity: Vec<u8>,
    pub sum: Vec<u16>,
    pub tier: Vec<u8>,
}

fn read_records(dir: &Path, name: &str, record_size: usize) -> Result<(Vec<u8>, usize)> {
    let path = dir.join(name);
    let raw = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    if raw.len() % record_size != 0 {
        bail!(
            "{}: length {} is not a multiple of record size {}",
            path.display(),
            raw.len(),
            record_size
        );
    }
    let count = raw.len() / record_size;
    Ok((raw, count))
}

impl Dataset {
    /// Reads `combos.bin`, `oddeven.bin`, `sum.bin` and `tier.bin` from `dir`
    /// and checks that they hold the same number of records.
    pub fn load(dir: &Path) -> Result<Self> {
        let (raw_combos, n) = read_records(dir, COMBOS_FILE, PICK)?;
        let (parity, n_parity) = read_records(dir, ODDEVEN_FILE, 1)?;
        let (raw_sum, n_sum) = read_records(dir, SUM_FILE, 2)?;
        let (tier, n_tier) = read_records(dir, TIER_FILE, 1)?;

        for (name, count) in [(ODDEVEN_FILE, n_parity), (SUM_FILE, n_sum), (TIER_FILE, n_tier)] {
            if count != n {
                bail!("{name} holds {count} records but {COMBOS_FILE} holds {n}");
            }
        }

        let combos = raw_combos
            .chunks_exact(PICK)
            .map(|c| Combination([c[0], c[1], c[2], c[3], c[4], c[5]]))
            .collect();
        let sum = raw_sum
            .chunks_exact(2)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]))
            .collect();

        Ok(Dataset {
            combos,
            parity,
            sum,
            tier,
        })
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<Record> {
        Some(Record {
            index,
            combo: *self.combos.get(index)?,
            parity: *self.parity.get(index)?,
            sum: *self.sum.get(index)?,
            tier: *self.tier.get(index)?,
        })
    }

    /// Direct lookup through the closed-form rank; `None` for malformed input.
    pub fn lookup(&self, combo: &Combination) -> Option<Record> {
        if !combo.is_valid() {
            return None;
        }
        self.record(rank(combo)).filter(|r| r.combo == *combo)
    }

    /// Records whose sum lies in `min..=max`, in index order, at most `limit`.
    pub fn filter_by_sum(&self, min: u16, max: u16, limit: usize) -> Vec<Record> {
        self.sum
            .iter()
            .enumerate()
            .filter(|&(_, s)| (min..=max).contains(s))
            .take(limit)
            .filter_map(|(i, _)| self.record(i))
            .collect()
    }

    /// Checks cardinality, validity, strict canonical order and that every
    /// stat record describes the combination at the same index.
    pub fn verify(&self) -> Result<()> {
        if self.len() != COMBINATION_COUNT {
            bail!("expected {} combinations, found {}", COMBINATION_COUNT, self.len());
        }
        if let Some((i, c)) = self.combos.iter().find_position(|c| !c.is_valid()) {
            bail!("combination #{i} {c} is not a valid increasing 6-of-45 tuple");
        }
        if let Some((i, (a, b))) = self
            .combos
            .iter()
            .tuple_windows()
            .find_position(|(a, b)| a >= b)
        {
            bail!("order broken at #{}: {} is not below {}", i + 1, a, b);
        }

        let mismatch = (0..self.len()).into_par_iter().find_first(|&i| {
            let f = Features::of(&self.combos[i]);
            f.parity != self.parity[i] || f.sum != self.sum[i] || f.tier() != self.tier[i]
        });
        if let Some(i) = mismatch {
            bail!("stats at #{i} do not describe {}", self.combos[i]);
        }
        Ok(())
    }
}
