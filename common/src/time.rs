use chrono::DateTime;

/// Milliseconds since the Unix epoch, from the system clock.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Formats an epoch-millisecond timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Out-of-range inputs fall back to the epoch rather than failing;
/// report timestamps are informational.
pub fn format_ts(ts_ms: u64) -> String {
    DateTime::from_timestamp_millis(ts_ms as i64)
        .unwrap_or_default()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
