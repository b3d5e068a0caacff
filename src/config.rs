//! Runtime configuration.
//!
//! The binary takes no arguments; every knob is an optional environment
//! variable whose default reproduces the stock behaviour.

use log::warn;
use std::path::PathBuf;

pub const DEFAULT_OUT_DIR: &str = "bin";

const THREAD_HINTS: [&str; 4] = [
    "PRECOMPUTE_THREADS",
    "RAYON_NUM_THREADS",
    "SLURM_CPUS_PER_TASK",
    "OMP_NUM_THREADS",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadConfig {
    pub count: usize,
    pub source: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub out_dir: PathBuf,
    pub threads: ThreadConfig,
    pub progress: bool,
    pub verify: bool,
    pub npz_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so callers (and tests)
    /// never need to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let out_dir = lookup("PRECOMPUTE_OUT_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

        let npz_path = lookup("PRECOMPUTE_NPZ")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Config {
            out_dir,
            threads: detect_thread_config(&lookup),
            progress: parse_flag(&lookup, "PRECOMPUTE_PROGRESS", true),
            verify: parse_flag(&lookup, "PRECOMPUTE_VERIFY", false),
            npz_path,
        }
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => default,
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        Some(other) => {
            warn!("[config] ignoring {key}={other:?}; expected 0 or 1");
            default
        }
    }
}

fn detect_thread_config<F>(lookup: &F) -> ThreadConfig
where
    F: Fn(&str) -> Option<String>,
{
    for &key in &THREAD_HINTS {
        if let Some(v) = lookup(key) {
            match v.trim().parse::<usize>() {
                Ok(val) if val > 0 => {
                    return ThreadConfig {
                        count: val,
                        source: key.to_string(),
                    };
                }
                _ => warn!("[config] ignoring {key}={v:?}; expected a positive integer"),
            }
        }
    }

    let fallback = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1);

    ThreadConfig {
        count: fallback,
        source: "available_parallelism".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_stock_behaviour() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.out_dir, PathBuf::from("bin"));
        assert!(cfg.progress);
        assert!(!cfg.verify);
        assert!(cfg.npz_path.is_none());
        assert_eq!(cfg.threads.source, "available_parallelism");
        assert!(cfg.threads.count >= 1);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("PRECOMPUTE_OUT_DIR", "/tmp/out"),
            ("PRECOMPUTE_PROGRESS", "0"),
            ("PRECOMPUTE_VERIFY", "1"),
            ("PRECOMPUTE_NPZ", "all.npz"),
        ]);
        assert_eq!(cfg.out_dir, PathBuf::from("/tmp/out"));
        assert!(!cfg.progress);
        assert!(cfg.verify);
        assert_eq!(cfg.npz_path, Some(PathBuf::from("all.npz")));
    }

    #[test]
    fn thread_hints_follow_priority() {
        let cfg = config_from(&[("OMP_NUM_THREADS", "3"), ("RAYON_NUM_THREADS", "5")]);
        assert_eq!(cfg.threads.count, 5);
        assert_eq!(cfg.threads.source, "RAYON_NUM_THREADS");
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config_from(&[
            ("PRECOMPUTE_THREADS", "zero"),
            ("RAYON_NUM_THREADS", "0"),
            ("OMP_NUM_THREADS", "2"),
            ("PRECOMPUTE_VERIFY", "maybe"),
            ("PRECOMPUTE_OUT_DIR", "  "),
        ]);
        assert_eq!(cfg.threads.count, 2);
        assert_eq!(cfg.threads.source, "OMP_NUM_THREADS");
        assert!(!cfg.verify);
        assert_eq!(cfg.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
    }
}
