//! Human-readable sizes and durations for log lines

use std::time::Duration;

/// Formats a byte count with binary units, e.g. `512B`, `1.50KB`, `15.0MB`
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }

    let precision = if value >= 10.0 { 1 } else { 2 };
    format!("{value:.precision$}{unit}")
}

/// Formats an elapsed duration, e.g. `850ms` or `2.35s`
pub fn format_elapsed(elapsed: Duration) -> String {
    match elapsed.as_millis() {
        millis @ 0..1000 => format!("{millis}ms"),
        _ => format!("{:.2}s", elapsed.as_secs_f64()),
    }
}
