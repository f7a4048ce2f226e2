//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::backend::SeriesPoint;
use crate::backend::types::DATE_FORMAT;
use crate::events::Origin;
use crate::reconciler::SliceStatus;
use ratatui::prelude::Color;

/// Get a ratatui color for the source of an event
pub fn origin_color(origin: &Origin) -> Color {
    match origin {
        Origin::SeriesFetcher => Color::Cyan,
        Origin::ChangePointFetcher => Color::LightRed,
        Origin::StatsFetcher => Color::Green,
        Origin::Controller => Color::Yellow,
    }
}

pub fn status_color(status: SliceStatus) -> Color {
    match status {
        SliceStatus::Empty => Color::DarkGray,
        SliceStatus::Pending => Color::LightBlue,
        SliceStatus::Fresh => Color::Green,
        SliceStatus::Failed => Color::Red,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") || msg.contains("Connection refused") {
        return match msg.split_once(": ") {
            Some((prefix, _)) => format!("{}: backend unreachable", prefix),
            None => "Backend unreachable".to_string(),
        };
    }
    if msg.contains("operation timed out") {
        return match msg.split_once(": ") {
            Some((prefix, _)) => format!("{}: request timed out", prefix),
            None => "Request timed out".to_string(),
        };
    }
    msg.to_string()
}

/// Lower and upper y bounds for `values`, padded by 5% so lines stay off the border.
pub fn value_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    [min - pad, max + pad]
}

/// First, middle and last dates of the series as axis labels.
pub fn date_labels(series: &[SeriesPoint]) -> Vec<String> {
    let fmt = |p: &SeriesPoint| p.date.format(DATE_FORMAT).to_string();
    match series {
        [] => Vec::new(),
        [only] => vec![fmt(only)],
        [first, .., last] => vec![fmt(first), fmt(&series[series.len() / 2]), fmt(last)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciler::state::tests::point;

    #[test]
    fn test_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2024-03-07 14:05:09"), "03-07 14:05");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_clean_http_error_message() {
        assert_eq!(
            clean_http_error_message(
                "Failed to fetch series: Reqwest error: error sending request for url"
            ),
            "Failed to fetch series: backend unreachable"
        );
        assert_eq!(clean_http_error_message("plain"), "plain");
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(value_bounds([5.0].into_iter()), [4.0, 6.0]);
        let [lo, hi] = value_bounds([0.0, 10.0, f64::NAN].into_iter());
        assert!((lo + 0.5).abs() < 1e-9);
        assert!((hi - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_date_labels() {
        let series = vec![
            point("2020-01-01", 1.0, 0.0),
            point("2020-01-02", 1.0, 0.0),
            point("2020-01-03", 1.0, 0.0),
        ];
        assert_eq!(
            date_labels(&series),
            vec!["2020-01-01", "2020-01-02", "2020-01-03"]
        );
        assert_eq!(date_labels(&series[..1]), vec!["2020-01-01"]);
        assert!(date_labels(&[]).is_empty());
    }
}
