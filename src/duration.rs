use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// WebVTT cue timestamp, `HH:MM:SS.mmm`
const TIMESTAMP_PATTERN: &str = r"([0-9]{2}):([0-9]{2}):([0-9]{2})\.([0-9]{3})";

/// Content duration derived from the latest caption timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedDuration {
    /// Whole minutes, rounded up
    pub total_minutes: u64,
    /// Zero-padded `HH:MM:SS`
    pub formatted: String,
}

impl DetectedDuration {
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self {
            total_minutes: total_seconds.div_ceil(60),
            formatted: format_hms(total_seconds),
        }
    }
}

impl fmt::Display for DetectedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} minutes)", self.formatted, self.total_minutes)
    }
}

/// Extract the content duration from caption text.
///
/// Returns `None` when the text holds no timestamps at all.
pub fn extract_duration(text: &str) -> Option<DetectedDuration> {
    let re = Regex::new(TIMESTAMP_PATTERN).ok()?;

    let max_seconds = re
        .captures_iter(text)
        .filter_map(|caps| {
            let hours: u64 = caps[1].parse().ok()?;
            let minutes: u64 = caps[2].parse().ok()?;
            let seconds: u64 = caps[3].parse().ok()?;
            Some(hours * 3600 + minutes * 60 + seconds)
        })
        .max()?;

    let duration = DetectedDuration::from_seconds(max_seconds);
    debug!("Detected content duration: {}", duration);
    Some(duration)
}

fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
