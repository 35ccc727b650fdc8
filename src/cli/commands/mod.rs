//! Command implementations.

pub mod attendance;
pub mod completions;
pub mod employee;
pub mod report;
pub mod sale;
pub mod shell;
pub mod version;

use chrono::{Local, TimeZone};

/// Format Unix milliseconds as local `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_timestamp(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| ms.to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_shape() {
        let text = format_timestamp(chrono::Utc::now().timestamp_millis());
        assert_eq!(text.len(), 19);
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[13..14], ":");
    }
}
