//! Human-readable byte counts

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const STEP: f64 = 1024.0;

/// Format a byte count using 1024-based units up to GB.
///
/// The value is rounded to two decimals and printed without trailing zeros,
/// so `1536` becomes `"1.5 KB"` and `1024` becomes `"1 KB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}
