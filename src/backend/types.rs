//! Wire and domain types for the analysis backend
//!
//! The backend speaks JSON; these types decode it directly into the values the
//! dashboard keeps in its state container.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Calendar date format used on the wire and in user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Offset into the most recently fetched series, if the backend detected one.
pub type ChangePointIndex = Option<i64>;

/// A single observation of the price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "Date", deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "log_returns")]
    pub log_return: f64,
}

/// The four moments describing one side of the change point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub mean: f64,
    pub std: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl Moments {
    pub fn mean_display(&self) -> String {
        format!("{:.6}", self.mean)
    }

    pub fn std_display(&self) -> String {
        format!("{:.6}", self.std)
    }

    pub fn skewness_display(&self) -> String {
        format!("{:.4}", self.skewness)
    }

    pub fn kurtosis_display(&self) -> String {
        format!("{:.2}", self.kurtosis)
    }
}

impl Display for Moments {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean {} | std {} | skew {} | kurt {}",
            self.mean_display(),
            self.std_display(),
            self.skewness_display(),
            self.kurtosis_display()
        )
    }
}

/// Summary statistics before and after the change point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub before: Moments,
    pub after: Moments,
}

/// Response body of `GET /api/change_point`.
///
/// Older backends answer with `change_point` instead of `change_point_index`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChangePointResponse {
    #[serde(default, alias = "change_point")]
    pub change_point_index: ChangePointIndex,
}

/// Selected date window. Either side may be open.
///
/// No ordering check is done here: a start after the end is forwarded as-is
/// and left for the backend to judge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Query parameters for the series endpoint. Absent bounds are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(start) = self.start {
            pairs.push(("start_date", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end_date", end.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.start, self.end) {
            (None, None) => write!(f, "all dates"),
            (Some(start), None) => write!(f, "{}..", start.format(DATE_FORMAT)),
            (None, Some(end)) => write!(f, "..{}", end.format(DATE_FORMAT)),
            (Some(start), Some(end)) => write!(
                f,
                "{}..{}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
        }
    }
}

/// Parse a user-entered date. An empty (or whitespace) entry clears the bound.
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map(Some)
}

/// Reduce a backend date string to its calendar date.
///
/// Accepts plain dates, ISO-8601 timestamps and RFC 2822 dates (the format
/// Flask uses when serializing datetimes). Time of day and offsets are dropped.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Some(prefix) = raw.get(..10) {
        let rest = &raw[10..];
        if rest.starts_with('T') || rest.starts_with(' ') {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, DATE_FORMAT) {
                return Some(date);
            }
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(raw) {
        return Some(datetime.date_naive());
    }
    // RFC 2822 parsing rejects the "GMT" zone name on some inputs; retry without it.
    if let Some(stripped) = raw.strip_suffix(" GMT") {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(stripped, "%a, %d %b %Y %H:%M:%S") {
            return Some(datetime.date());
        }
    }
    None
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    // Absent bounds must not appear in the query at all.
    fn test_query_pairs_omit_absent_bounds() {
        assert!(DateRange::default().query_pairs().is_empty());

        let start_only = DateRange::new(Some(date("2020-01-01")), None);
        assert_eq!(
            start_only.query_pairs(),
            vec![("start_date", "2020-01-01".to_string())]
        );

        let end_only = DateRange::new(None, Some(date("2021-12-31")));
        assert_eq!(
            end_only.query_pairs(),
            vec![("end_date", "2021-12-31".to_string())]
        );

        let both = DateRange::new(Some(date("2020-01-01")), Some(date("2021-12-31")));
        assert_eq!(
            both.query_pairs(),
            vec![
                ("start_date", "2020-01-01".to_string()),
                ("end_date", "2021-12-31".to_string())
            ]
        );
    }

    #[test]
    fn test_moments_display_precision() {
        let moments = Moments {
            mean: 0.0123456789,
            std: 0.5,
            skewness: -0.123456,
            kurtosis: 3.14159,
        };
        assert_eq!(
            moments.to_string(),
            "mean 0.012346 | std 0.500000 | skew -0.1235 | kurt 3.14"
        );
    }

    #[test]
    // Inverted ranges are forwarded untouched.
    fn test_inverted_range_is_not_rejected() {
        let inverted = DateRange::new(Some(date("2022-01-01")), Some(date("2020-01-01")));
        assert_eq!(inverted.query_pairs().len(), 2);
        assert_eq!(inverted.to_string(), "2022-01-01..2020-01-01");
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = date("2020-01-02");
        assert_eq!(parse_calendar_date("2020-01-02"), Some(expected));
        assert_eq!(parse_calendar_date("2020-01-02T00:00:00"), Some(expected));
        assert_eq!(parse_calendar_date("2020-01-02 13:45:00"), Some(expected));
        assert_eq!(
            parse_calendar_date("Thu, 02 Jan 2020 00:00:00 GMT"),
            Some(expected)
        );
        assert_eq!(parse_calendar_date("02-Jan-20"), None);
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("").unwrap(), None);
        assert_eq!(parse_date_input("   ").unwrap(), None);
        assert_eq!(
            parse_date_input(" 2020-05-01 ").unwrap(),
            Some(date("2020-05-01"))
        );
        assert!(parse_date_input("2020-13-01").is_err());
    }

    #[test]
    fn test_decode_series_payload() {
        let json = r#"[
            {"Date": "2020-01-01", "Price": 50.0, "log_returns": 0.01},
            {"Date": "Thu, 02 Jan 2020 00:00:00 GMT", "Price": 51.0, "log_returns": 0.02}
        ]"#;
        let series: Vec<SeriesPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].date, date("2020-01-02"));
        assert_eq!(series[1].price, 51.0);
        assert_eq!(series[1].log_return, 0.02);
    }

    #[test]
    // Rows carrying only log returns have no date to plot against.
    fn test_series_rows_without_date_are_rejected() {
        let err = serde_json::from_str::<Vec<SeriesPoint>>(r#"[{"log_returns": 0.01}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `Date`"));
    }

    #[test]
    fn test_decode_change_point_variants() {
        let current: ChangePointResponse =
            serde_json::from_str(r#"{"change_point_index": 7}"#).unwrap();
        assert_eq!(current.change_point_index, Some(7));

        let null: ChangePointResponse =
            serde_json::from_str(r#"{"change_point_index": null}"#).unwrap();
        assert_eq!(null.change_point_index, None);

        let legacy: ChangePointResponse =
            serde_json::from_str(r#"{"change_point": 8357}"#).unwrap();
        assert_eq!(legacy.change_point_index, Some(8357));

        let missing: ChangePointResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.change_point_index, None);
    }

    #[test]
    fn test_series_point_serializes_with_wire_names() {
        let point = SeriesPoint {
            date: date("2020-01-01"),
            price: 50.0,
            log_return: 0.01,
        };
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["Date"], "2020-01-01");
        assert_eq!(value["Price"], 50.0);
        assert_eq!(value["log_returns"], 0.01);
    }
}
