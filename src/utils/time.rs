//! Time and timestamp utilities

/// Current Unix timestamp in milliseconds
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
