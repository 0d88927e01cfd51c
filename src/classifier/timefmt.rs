//! Best-effort timestamp reformatting for report output.

use chrono::{DateTime, NaiveDateTime};
use log::debug;

/// Reformat an ISO-8601-ish timestamp with the given strftime format.
/// Anything unparseable comes back unchanged.
pub fn format_timestamp(timestamp: &str, format: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format(format).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, pattern) {
            return dt.format(format).to_string();
        }
    }
    debug!("invalid timestamp format: {timestamp}, using original");
    timestamp.to_string()
}
