//! Timestamps: parsing `created_at`, the overall date range and a per-day series

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use docstore::{Document, Timestamp};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub day: NaiveDate,
    pub average_score: f64,
    pub count: usize,
}

/// Accepts RFC 3339, ISO date-times without an offset (read as UTC) and
/// plain `YYYY-MM-DD` dates. Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn created_at(doc: &Document) -> Option<DateTime<Utc>> {
    match doc.created_at()? {
        Timestamp::Text(raw) => parse_timestamp(raw),
        Timestamp::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms),
    }
}

/// Earliest and latest parseable `created_at`.
pub fn date_range(docs: &[Document]) -> Option<DateRange> {
    let mut stamps = docs.iter().filter_map(created_at);
    let first = stamps.next()?;
    let (start, end) = stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    Some(DateRange { start, end })
}

/// Average score and document count per UTC day, oldest day first.
/// Documents need both a parseable `created_at` and a score.
pub fn daily_series(docs: &[Document]) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for doc in docs {
        let (Some(at), Some(score)) = (created_at(doc), doc.score()) else { continue };
        let entry = days.entry(at.date_naive()).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(day, (sum, count))| DailyPoint {
            day,
            average_score: sum / count as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::docs;
    use chrono::TimeZone;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse_timestamp("2024-07-01T10:00:00Z"), Some(utc(2024, 7, 1, 10, 0, 0)));
        assert_eq!(parse_timestamp("2024-07-01T12:00:00+02:00"), Some(utc(2024, 7, 1, 10, 0, 0)));
        assert_eq!(parse_timestamp("2024-07-01T10:00:00.123456").map(|t| t.date_naive()),
            NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(parse_timestamp("2024-07-01 10:00:00"), Some(utc(2024, 7, 1, 10, 0, 0)));
        assert_eq!(parse_timestamp("2024-07-01"), Some(utc(2024, 7, 1, 0, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }

    #[test]
    fn test_range_skips_missing_and_invalid() {
        let range = date_range(&docs(json!([
            {"created_at": "2024-07-03T08:00:00Z"},
            {"created_at": "not a date"},
            {},
            {"created_at": "2024-07-01T09:30:00Z"},
            {"created_at": "2024-07-02"}
        ])))
        .unwrap();
        assert_eq!(range.start, utc(2024, 7, 1, 9, 30, 0));
        assert_eq!(range.end, utc(2024, 7, 3, 8, 0, 0));
    }

    #[test]
    fn test_range_reads_mongo_dates() {
        let range = date_range(&docs(json!([
            {"created_at": {"$date": "2024-07-02T08:00:00Z"}},
            {"created_at": {"$date": {"$numberLong": "1719828000000"}}},
            {"created_at": {"$oid": "66a1"}}
        ])))
        .unwrap();
        assert_eq!(range.start, utc(2024, 7, 1, 10, 0, 0));
        assert_eq!(range.end, utc(2024, 7, 2, 8, 0, 0));
    }

    #[test]
    fn test_range_without_dates() {
        assert_eq!(date_range(&docs(json!([{"created_at": "bad"}, {"score": 1}]))), None);
        assert_eq!(date_range(&[]), None);
    }

    #[test]
    fn test_daily_series_groups_by_day() {
        let series = daily_series(&docs(json!([
            {"created_at": "2024-07-02T23:00:00Z", "score": 40},
            {"created_at": "2024-07-01T10:00:00Z", "score": 10},
            {"created_at": "2024-07-02T01:00:00Z", "score": 80},
            {"created_at": "2024-07-02T05:00:00Z"},
            {"score": 99}
        ])));
        assert_eq!(
            series,
            vec![
                DailyPoint { day: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(), average_score: 10.0, count: 1 },
                DailyPoint { day: NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(), average_score: 60.0, count: 2 },
            ]
        );
    }
}
