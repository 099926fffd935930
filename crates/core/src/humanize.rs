//! Human-readable relative time formatting.
//!
//! Broadcast payloads for update-style events carry both the raw RFC 3339
//! timestamp and a coarse relative rendering for direct display in
//! activity feeds.

use crate::types::Timestamp;

/// Format `ts` relative to the current instant.
pub fn relative_from_now(ts: Timestamp) -> String {
    relative(ts, chrono::Utc::now())
}

/// Format `ts` relative to `now`.
///
/// Buckets coarsen with distance: seconds collapse to "just now",
/// then minutes, hours, and days. Anything older than a week renders
/// as a plain date. Timestamps in the future clamp to "just now".
pub fn relative(ts: Timestamp, now: Timestamp) -> String {
    let secs = (now - ts).num_seconds();

    if secs < 60 {
        return "just now".to_string();
    }

    let minutes = secs / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days <= 7 {
        return plural(days, "day");
    }

    ts.format("%b %-d, %Y").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
