use std::path::PathBuf;

/// Resolve the OpenClaw state directory. An explicit override (CLI flag or
/// `OPENCLAW_STATE_DIR`) wins; otherwise `~/.openclaw`.
pub fn openclaw_root(override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir {
        let dir = dir.trim();
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    let home = directories::BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~"));
    home.join(".openclaw")
}

/// Round half-away-from-zero to `digits` decimal places. Costs stay raw
/// through aggregation and only pass through here when written out.
pub fn round_to(v: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (v * factor).round() / factor
}

pub fn format_currency(v: f64) -> String {
    format!("${v:.2}")
}

pub fn format_tokens(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}
