use log::{info, warn};
use rayon::ThreadPoolBuilder;
use std::sync::Once;

use crate::config::ThreadConfig;

const MIB: u64 = 1024 * 1024;

pub fn configure_thread_pool(cfg: &ThreadConfig) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        match ThreadPoolBuilder::new()
            .num_threads(cfg.count)
            .thread_name(|i| format!("precompute-worker-{i}"))
            .build_global()
        {
            Ok(_) => {
                info!("[threads] rayon pool = {} threads (hint: {})", cfg.count, cfg.source);
            }
            Err(err) => {
                warn!("[threads] failed to configure rayon pool ({err}); continuing with default");
            }
        }
    });
}

/// Resident set size of this process, read from `/proc/self/statm`.
/// `None` where procfs is unavailable.
pub fn current_rss_bytes() -> Option<u64> {
    let contents = std::fs::read_to_string("/proc/self/statm").ok()?;
    let mut parts = contents.split_whitespace();
    let _total = parts.next()?;
    let resident_pages: u64 = parts.next()?.parse().ok()?;
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if page_size <= 0 {
        return None;
    }
    Some(resident_pages.saturating_mul(page_size as u64))
}

pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB as f64
}

pub fn report_memory(phase: &str) {
    if let Some(rss) = current_rss_bytes() {
        info!("[mem] after {phase}: rss={:.1} MiB", bytes_to_mib(rss));
    }
}
