//! Display formatters shared by the TUI pages and the table commands.
//!
//! All pure and total: malformed input falls back to a raw rendering,
//! never an error.

use chrono::{DateTime, Local};

/// Render an RFC 3339 timestamp in local time.
/// Unparseable input is returned unchanged.
pub fn format_date_time(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => value.to_string(),
    }
}

/// First 8 characters of an identifier, `-` for empty input.
/// Cosmetic truncation only; prefix collisions are fine.
pub fn format_short_id(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    value.chars().take(8).collect()
}

/// Display category for a resource status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Running,
    Stopped,
    Error,
    Pending,
}

impl Indicator {
    pub fn label(self) -> &'static str {
        match self {
            Indicator::Running => "running",
            Indicator::Stopped => "stopped",
            Indicator::Error => "error",
            Indicator::Pending => "pending",
        }
    }
}

/// Map a status string to its display category, case-insensitively.
/// Everything outside the known set (including STARTING) is pending.
pub fn status_indicator(status: &str) -> Indicator {
    match status.to_ascii_uppercase().as_str() {
        "RUNNING" => Indicator::Running,
        "STOPPED" => Indicator::Stopped,
        "ERROR" => Indicator::Error,
        _ => Indicator::Pending,
    }
}

/// Human-readable byte count (1024 divisor, one decimal above bytes).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Percentage with one decimal, `0.0` when the denominator is zero.
pub fn format_percent(numerator: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", numerator as f64 / denominator as f64 * 100.0)
}

/// Provisioned storage in GB with one decimal, from megabytes.
pub fn format_storage_gb(mb: u64) -> String {
    format!("{:.1}", mb as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_unparseable_passes_through() {
        assert_eq!(format_date_time("not-a-date"), "not-a-date");
        assert_eq!(format_date_time(""), "");
    }

    #[test]
    fn date_time_valid_differs_from_raw() {
        let raw = "2025-11-03T10:00:00Z";
        let formatted = format_date_time(raw);
        assert!(!formatted.is_empty());
        assert_ne!(formatted, raw);
        // Local rendering drops the T/Z markers
        assert!(!formatted.contains('T'));
    }

    #[test]
    fn date_time_with_offset() {
        let formatted = format_date_time("2025-11-03T10:00:00+02:00");
        assert!(!formatted.contains("+02:00"));
    }

    #[test]
    fn short_id_vectors() {
        assert_eq!(format_short_id(""), "-");
        assert_eq!(format_short_id("abc"), "abc");
        assert_eq!(format_short_id("abcdefgh"), "abcdefgh");
        assert_eq!(format_short_id("abcdefghij"), "abcdefgh");
    }

    #[test]
    fn short_id_multibyte_safe() {
        // Truncation counts characters, not bytes.
        assert_eq!(format_short_id("ééééééééééé"), "éééééééé");
    }

    #[test]
    fn status_known_values() {
        assert_eq!(status_indicator("RUNNING"), Indicator::Running);
        assert_eq!(status_indicator("running"), Indicator::Running);
        assert_eq!(status_indicator("Stopped"), Indicator::Stopped);
        assert_eq!(status_indicator("ERROR"), Indicator::Error);
    }

    #[test]
    fn status_everything_else_is_pending() {
        assert_eq!(status_indicator("STARTING"), Indicator::Pending);
        assert_eq!(status_indicator("starting"), Indicator::Pending);
        assert_eq!(status_indicator(""), Indicator::Pending);
        assert_eq!(status_indicator("unknown"), Indicator::Pending);
    }

    #[test]
    fn size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn percent_zero_denominator() {
        assert_eq!(format_percent(3, 0), "0.0");
        assert_eq!(format_percent(3, 5), "60.0");
        assert_eq!(format_percent(1, 3), "33.3");
    }

    #[test]
    fn storage_gb() {
        assert_eq!(format_storage_gb(0), "0.0");
        assert_eq!(format_storage_gb(4096), "4.0");
        assert_eq!(format_storage_gb(1536), "1.5");
    }
}
