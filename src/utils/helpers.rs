/// Helper utilities for formatting metrics values

use crate::utils::{KIB, MIB, METRICS_PATH};

/// Format bytes to human-readable size
///
/// Below 1 KB the exact byte count is shown, otherwise the value is scaled to
/// KB or MB with one decimal. MB is the largest unit.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// Heap usage as a whole percentage in `[0, 100]`
///
/// A zero `max` is treated as 1, so an unknown maximum saturates the bar
/// instead of dividing by zero. Readings where `used > max` clamp to 100.
pub fn compute_usage_percent(used: u64, max: u64) -> u8 {
    let max = max.max(1);
    let pct = (used as f64 / max as f64 * 100.0).round();
    pct.min(100.0) as u8
}

/// CSS-style width string for a bar fill, e.g. `"73%"`
pub fn percent_width(pct: u8) -> String {
    format!("{}%", pct)
}

/// Parse a width string written by [`percent_width`] back into a ratio in `[0.0, 1.0]`
///
/// Anything that isn't a percentage renders as an empty bar.
pub fn width_ratio(width: &str) -> f64 {
    width
        .trim()
        .strip_suffix('%')
        .and_then(|n| n.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| (n / 100.0).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Build the metrics URL from a base endpoint, tolerating a trailing slash
pub fn metrics_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), METRICS_PATH)
}
