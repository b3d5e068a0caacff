use anyhow::{Context, Result};
use ndarray::{ArrayView1, ArrayView2};
use ndarray_npy::NpzWriter;
use std::fs::File;
use std::path::Path;

use crate::enumeration::{Combination, PICK};
use crate::stats::StatColumns;

/// Writes the four arrays into one `.npz` for analysis tooling:
/// `combos.npy` (N x 6, u8), `oddeven.npy`, `sum.npy` (u16), `tier.npy`.
pub fn save_npz(path: &Path, combos: &[Combination], cols: &StatColumns) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut npz = NpzWriter::new(f);

    // Borrowed views; the export adds no copy of the in-memory arrays.
    let flat = bytemuck::cast_slice::<Combination, u8>(combos);
    let combos_2d = ArrayView2::from_shape((combos.len(), PICK), flat).context("shape combos")?;
    npz.add_array("combos.npy", &combos_2d)?;
    npz.add_array("oddeven.npy", &ArrayView1::from(&cols.parity[..]))?;
    npz.add_array("sum.npy", &ArrayView1::from(&cols.sum[..]))?;
    npz.add_array("tier.npy", &ArrayView1::from(&cols.tier[..]))?;

    npz.finish()
        .with_context(|| format!("finish {}", path.display()))?;
    Ok(())
}
