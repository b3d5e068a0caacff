use lotto_precompute::config::Config;
use std::path::Path;

/// Config pointing at `out_dir`, progress bars off, no other overrides.
pub fn quiet_config(out_dir: &Path) -> Config {
    let out = out_dir.to_string_lossy().into_owned();
    Config::from_lookup(|key| match key {
        "PRECOMPUTE_OUT_DIR" => Some(out.clone()),
        "PRECOMPUTE_PROGRESS" => Some("0".to_string()),
        _ => None,
    })
}
