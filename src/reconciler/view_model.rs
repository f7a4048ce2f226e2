//! Render-ready snapshot of the dashboard

use super::state::DashboardData;
use crate::backend::{ChangePointIndex, SeriesPoint, SummaryStats};
use chrono::NaiveDate;
use serde::Serialize;

/// Position of the change-point marker on the series.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub index: usize,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel<'a> {
    pub series: &'a [SeriesPoint],
    pub marker: Option<Marker>,
    pub stats: Option<&'a SummaryStats>,
    pub loading: bool,
}

impl<'a> ViewModel<'a> {
    pub fn from_data(data: &'a DashboardData) -> Self {
        Self {
            series: data.series(),
            marker: locate_marker(data.series(), data.change_point()),
            stats: data.stats(),
            loading: data.is_loading(),
        }
    }

    /// One-line overview for console output.
    pub fn summary(&self) -> String {
        let marker = match self.marker {
            Some(m) => format!("{} (#{})", m.date, m.index),
            None => "none".to_string(),
        };
        let stats = match self.stats {
            Some(stats) => format!(
                "before mean {} | after mean {}",
                stats.before.mean_display(),
                stats.after.mean_display()
            ),
            None => "no stats".to_string(),
        };
        format!(
            "{} points | change point {} | {}",
            self.series.len(),
            marker,
            stats
        )
    }

    /// Multi-line plain-text rendering.
    pub fn render_text(&self) -> String {
        let mut lines = vec![self.summary()];
        if let (Some(first), Some(last)) = (self.series.first(), self.series.last()) {
            lines.push(format!(
                "series: {} .. {} (price {:.2} -> {:.2})",
                first.date, last.date, first.price, last.price
            ));
        }
        if let Some(stats) = self.stats {
            lines.push(format!("before: {}", stats.before));
            lines.push(format!("after:  {}", stats.after));
        }
        if self.loading {
            lines.push("still loading".to_string());
        }
        lines.join("\n")
    }
}

/// Map the change-point index onto the series.
///
/// Absent, negative and out-of-range indexes yield no marker.
pub fn locate_marker(series: &[SeriesPoint], index: ChangePointIndex) -> Option<Marker> {
    let index = usize::try_from(index?).ok()?;
    series.get(index).map(|point| Marker {
        index,
        date: point.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciler::state::tests::{point, stats};
    use crate::reconciler::state::{Fetched, Outcome, Resolution};

    fn two_points() -> Vec<SeriesPoint> {
        vec![point("2020-01-01", 50.0, 0.01), point("2020-01-02", 51.0, 0.02)]
    }

    #[test]
    fn test_marker_within_bounds() {
        let series = two_points();
        assert_eq!(
            locate_marker(&series, Some(1)),
            Some(Marker {
                index: 1,
                date: series[1].date
            })
        );
        assert_eq!(locate_marker(&series, Some(0)).unwrap().date, series[0].date);
    }

    #[test]
    fn test_marker_suppressed() {
        let series = two_points();
        assert_eq!(locate_marker(&series, None), None);
        assert_eq!(locate_marker(&series, Some(2)), None);
        assert_eq!(locate_marker(&series, Some(5)), None);
        assert_eq!(locate_marker(&series, Some(-1)), None);
        assert_eq!(locate_marker(&[], Some(0)), None);
    }

    #[test]
    // Unset range, two points, index 1, both stats blocks.
    fn test_end_to_end_view_model() {
        let mut data = DashboardData::new();
        let generation = data.begin_refresh();
        data.apply(Resolution::new(
            generation,
            Outcome::Series(Fetched::Updated(two_points())),
        ));
        data.apply(Resolution::new(
            generation,
            Outcome::ChangePoint(Fetched::Updated(Some(1))),
        ));
        data.apply(Resolution::new(generation, Outcome::Stats(Fetched::Updated(stats()))));

        let view = ViewModel::from_data(&data);
        assert_eq!(
            view.marker.map(|m| m.date.to_string()),
            Some("2020-01-02".to_string())
        );
        let stats = view.stats.unwrap();
        assert_eq!(stats.before.mean, 0.01);
        assert_eq!(stats.after.mean, 0.02);
        assert!(!view.loading);
        assert_eq!(view.series.len(), 2);
    }

    #[test]
    // Marker follows whichever series and index are current, in either arrival order.
    fn test_marker_recomputed_from_latest_values() {
        let mut data = DashboardData::new();
        let generation = data.begin_refresh();
        data.apply(Resolution::new(
            generation,
            Outcome::ChangePoint(Fetched::Updated(Some(1))),
        ));
        // Index arrived before the series: nothing to mark yet.
        assert_eq!(ViewModel::from_data(&data).marker, None);

        data.apply(Resolution::new(
            generation,
            Outcome::Series(Fetched::Updated(two_points())),
        ));
        assert_eq!(ViewModel::from_data(&data).marker.map(|m| m.index), Some(1));
    }

    #[test]
    fn test_text_rendering() {
        let series = two_points();
        let stats = stats();
        let view = ViewModel {
            series: &series,
            marker: locate_marker(&series, Some(1)),
            stats: Some(&stats),
            loading: false,
        };
        assert_eq!(
            view.summary(),
            "2 points | change point 2020-01-02 (#1) | before mean 0.010000 | after mean 0.020000"
        );
        let text = view.render_text();
        assert!(text.contains("series: 2020-01-01 .. 2020-01-02 (price 50.00 -> 51.00)"));
        assert!(text.contains("after:  mean 0.020000 | std 0.500000 | skew -0.1000 | kurt 3.20"));
        assert!(!text.contains("still loading"));
    }

    #[test]
    fn test_view_model_serializes() {
        let mut data = DashboardData::new();
        let generation = data.begin_refresh();
        data.apply(Resolution::new(
            generation,
            Outcome::Series(Fetched::Updated(two_points())),
        ));
        data.apply(Resolution::new(
            generation,
            Outcome::ChangePoint(Fetched::Updated(Some(5))),
        ));

        let json = serde_json::to_value(ViewModel::from_data(&data)).unwrap();
        assert_eq!(json["marker"], serde_json::Value::Null);
        assert_eq!(json["stats"], serde_json::Value::Null);
        assert_eq!(json["loading"], false);
        assert_eq!(json["series"][1]["Date"], "2020-01-02");
    }
}
