use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::Instant;

use crate::config::Config;
use crate::enumeration::{Combination, enumerate_all};
use crate::persist::{
    COMBOS_FILE, Dataset, ODDEVEN_FILE, SUM_FILE, SavedFile, TIER_FILE, ensure_dir, npz, save_bin,
};
use crate::runtime::report_memory;
use crate::stats::StatColumns;

#[derive(Debug)]
pub struct RunReport {
    pub count: usize,
    pub saved: Vec<SavedFile>,
}

fn progress_bar(enabled: bool, template: &str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template(template)
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(0).with_style(style)
}

/// Writes the combination array and the three stat columns, one file each.
pub fn save_all(
    cfg: &Config,
    combos: &[Combination],
    cols: &StatColumns,
) -> Result<Vec<SavedFile>> {
    let dir = cfg.out_dir.as_path();
    let saved = vec![
        save_bin(dir, COMBOS_FILE, combos)?,
        save_bin(dir, ODDEVEN_FILE, &cols.parity)?,
        save_bin(dir, SUM_FILE, &cols.sum)?,
        save_bin(dir, TIER_FILE, &cols.tier)?,
    ];
    Ok(saved)
}

/// Enumerate, derive stats, persist. Any failure aborts the whole run.
pub fn run(cfg: &Config) -> Result<RunReport> {
    // Fail on an unusable output path before spending time on the compute phases.
    ensure_dir(&cfg.out_dir)?;

    println!(">>> Step 1: Generating combinations...");
    let t0 = Instant::now();
    let pb = progress_bar(
        cfg.progress,
        "[{elapsed_precise}] {bar:40} {pos}/{len} leading values",
    );
    let combos = enumerate_all(&pb);
    pb.finish_and_clear();
    println!("    Total: {}", combos.len());
    info!("[enumerate] {} combinations in {:.3}s", combos.len(), t0.elapsed().as_secs_f64());
    report_memory("enumerate");

    println!(">>> Step 2: Processing statistics...");
    let t1 = Instant::now();
    let pb = progress_bar(cfg.progress, "[{elapsed_precise}] {bar:40} {pos}/{len} records");
    let cols = StatColumns::compute_with_progress(&combos, &pb);
    pb.finish_and_clear();
    info!("[stats] {} records in {:.3}s", cols.len(), t1.elapsed().as_secs_f64());
    report_memory("stats");

    println!(">>> Step 3: Saving files to {}/ ...", cfg.out_dir.display());
    let saved = save_all(cfg, &combos, &cols)?;
    for f in &saved {
        println!("{}", f.report_line());
    }

    if let Some(path) = &cfg.npz_path {
        npz::save_npz(path, &combos, &cols)?;
        info!("[npz] exported to {}", path.display());
    }

    if cfg.verify {
        let t2 = Instant::now();
        Dataset::load(&cfg.out_dir)
            .and_then(|ds| ds.verify())
            .with_context(|| format!("verify {}", cfg.out_dir.display()))?;
        info!("[verify] artifacts consistent ({:.3}s)", t2.elapsed().as_secs_f64());
    }

    println!("\n>>> Completed.");
    Ok(RunReport {
        count: combos.len(),
        saved,
    })
}
