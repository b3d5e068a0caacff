use anyhow::Result;
use env_logger::Env;
use log::info;
use std::process::ExitCode;

use lotto_precompute::config::Config;
use lotto_precompute::{pipeline, runtime};

fn run() -> Result<()> {
    let cfg = Config::from_env();
    runtime::configure_thread_pool(&cfg.threads);
    info!(
        "[config] out_dir={} progress={} verify={} npz={:?}",
        cfg.out_dir.display(),
        cfg.progress,
        cfg.verify,
        cfg.npz_path
    );

    pipeline::run(&cfg)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[FATAL] {err:#}");
            ExitCode::FAILURE
        }
    }
}
