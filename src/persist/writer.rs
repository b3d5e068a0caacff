use anyhow::{Context, Result, bail};
use bytemuck::Pod;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::runtime::bytes_to_mib;

/// One written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

impl SavedFile {
    pub fn mib(&self) -> f64 {
        bytes_to_mib(self.bytes)
    }

    /// `[Saved]   combos.bin  (46.61 MB)`
    pub fn report_line(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("[Saved] {:>12}  ({:.2} MB)", name, self.mib())
    }
}

/// Creates `dir` and any missing parents; a no-op if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        bail!("output path {} exists and is not a directory", dir.display());
    }
    fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))
}

/// Dumps `data` to `dir/name` as raw native-endian records: no header, no
/// length prefix, file length is exactly `data.len() * size_of::<T>()`.
pub fn save_bin<T: Pod>(dir: &Path, name: &str, data: &[T]) -> Result<SavedFile> {
    ensure_dir(dir)?;
    let path = dir.join(name);
    let bytes: &[u8] = bytemuck::cast_slice(data);

    let mut f =
        File::create(&path).with_context(|| format!("cannot open file {}", path.display()))?;
    f.write_all(bytes).with_context(|| format!("write {}", path.display()))?;
    f.flush().with_context(|| format!("flush {}", path.display()))?;

    Ok(SavedFile {
        path,
        bytes: bytes.len() as u64,
    })
}
