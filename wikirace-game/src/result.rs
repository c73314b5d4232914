//! Race result statistics
use serde::{Deserialize, Serialize};

/// Statistics for a finished race.
///
/// Produced exactly once, at the moment the goal article is reached, and
/// handed to the stores; never recomputed against a different start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    /// Wall-clock time from start to goal, in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub click_count: u32,
    /// Number of articles visited, start and goal included.
    pub path_length: usize,
    /// Chronological titles along the path.
    pub articles_visited: Vec<String>,
}

/// Render a millisecond duration as `mm:ss` for headers and leaderboards.
#[must_use]
pub fn format_duration(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sub_minute_durations() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(999), "00:00");
        assert_eq!(format_duration(59_000), "00:59");
    }

    #[test]
    fn formats_minutes_and_overflow() {
        assert_eq!(format_duration(60_000), "01:00");
        assert_eq!(format_duration(754_000), "12:34");
        // Hours simply accumulate into the minute field.
        assert_eq!(format_duration(3_600_000), "60:00");
    }

    #[test]
    fn persisted_shape_uses_original_field_names() {
        let result = RaceResult {
            duration_ms: 45_000,
            click_count: 3,
            path_length: 4,
            articles_visited: vec!["A".to_string(), "B".to_string()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("duration").is_some());
        assert!(value.get("clickCount").is_some());
        assert!(value.get("pathLength").is_some());
        assert!(value.get("articlesVisited").is_some());
    }
}
