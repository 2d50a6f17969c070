//! Utility functions and helpers

use chrono::DateTime;

use crate::shared::types::ActivationType;

/// Format a token amount with its decimals
pub fn format_amount(amount: u64, decimals: u8) -> String {
    let value = amount as f64 / 10_f64.powi(decimals as i32);
    format!("{:.6}", value)
}

/// Human readable duration for logs, e.g. `1d 2h 30m`
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

/// Describe an activation point in the unit its activation type uses
pub fn describe_activation_point(activation_type: ActivationType, point: u64) -> String {
    match activation_type {
        ActivationType::Slot => format!("slot {}", point),
        ActivationType::Timestamp => i64::try_from(point)
            .ok()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| format!("unix {}", point)),
    }
}
