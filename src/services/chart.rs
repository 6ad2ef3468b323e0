//! Bar chart geometry

/// Default pixel height of the tallest bar
pub const DEFAULT_MAX_HEIGHT: u32 = 360;

/// Scale each count to a bar height proportional to `max_count`.
/// Example: counts=[2, 4], max=4, max_height=360 → [180.0, 360.0]
pub fn bar_heights(counts: &[u64], max_count: u64, max_height: u32) -> Vec<f64> {
    if max_count == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|&c| c as f64 * f64::from(max_height) / max_count as f64)
        .collect()
}

/// Format a text bar for a height relative to `max_height`.
/// Example: height=180, max=360, width=8 → "▓▓▓▓░░░░"
pub fn format_bar(height: f64, max_height: u32, width: usize) -> String {
    if max_height == 0 || width == 0 {
        return "░".repeat(width);
    }
    let ratio = (height / f64::from(max_height)).max(0.0);
    let filled = (ratio * width as f64).round() as usize;
    let filled = filled.min(width);
    let empty = width - filled;
    format!("{}{}", "▓".repeat(filled), "░".repeat(empty))
}
