//! Revenue chart series

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::RevenuePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Up to 31 days daily, up to 120 weekly, monthly beyond
    pub fn for_span(days: i64) -> Self {
        match days {
            ..=31 => Self::Day,
            32..=120 => Self::Week,
            _ => Self::Month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub start: NaiveDate,
    pub label: String,
    pub value: Decimal,
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + Duration::days(31))
}

/// Group `points` between `start` and `end` (inclusive) into zero-filled buckets
pub fn bucket_series(points: &[RevenuePoint], start: NaiveDate, end: NaiveDate) -> Vec<Bucket> {
    if end < start {
        return Vec::new();
    }
    let granularity = Granularity::for_span((end - start).num_days() + 1);

    let mut buckets: Vec<Bucket> = Vec::new();
    let mut cursor = match granularity {
        Granularity::Month => month_start(start),
        _ => start,
    };
    while cursor <= end {
        let label = match granularity {
            Granularity::Day | Granularity::Week => cursor.format("%d/%m").to_string(),
            Granularity::Month => cursor.format("%m/%Y").to_string(),
        };
        buckets.push(Bucket {
            start: cursor,
            label,
            value: Decimal::ZERO,
        });
        cursor = match granularity {
            Granularity::Day => cursor + Duration::days(1),
            Granularity::Week => cursor + Duration::days(7),
            Granularity::Month => next_month(cursor),
        };
    }

    for point in points.iter().filter(|p| p.date >= start && p.date <= end) {
        // buckets are sorted by start; take the last one starting on or before the point
        let idx = buckets.partition_point(|b| b.start <= point.date);
        if let Some(bucket) = idx.checked_sub(1).and_then(|i| buckets.get_mut(i)) {
            bucket.value += point.value;
        }
    }
    buckets
}

/// Thin axis labels to at most `max` visible ones; hidden labels are empty
pub fn sample_labels(labels: &[String], max: usize) -> Vec<String> {
    if max == 0 {
        return vec![String::new(); labels.len()];
    }
    let step = labels.len().div_ceil(max).max(1);
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| if i % step == 0 { l.clone() } else { String::new() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn point(date: NaiveDate, value: i64) -> RevenuePoint {
        RevenuePoint {
            date,
            value: Decimal::from(value),
        }
    }

    #[test]
    fn test_daily_zero_fill() {
        let buckets = bucket_series(&[point(d(2024, 5, 2), 100)], d(2024, 5, 1), d(2024, 5, 3));
        let values: Vec<Decimal> = buckets.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![Decimal::ZERO, Decimal::from(100), Decimal::ZERO]);
        assert_eq!(buckets[0].label, "01/05");
    }

    #[test]
    fn test_weekly_buckets() {
        let start = d(2024, 1, 1);
        let end = d(2024, 3, 1); // 61 days
        let buckets = bucket_series(
            &[point(d(2024, 1, 3), 10), point(d(2024, 1, 7), 5), point(d(2024, 1, 8), 1)],
            start,
            end,
        );
        assert_eq!(buckets.len(), 9);
        assert_eq!(buckets[0].value, Decimal::from(15));
        assert_eq!(buckets[1].value, Decimal::from(1));
    }

    #[test]
    fn test_monthly_buckets_span_year_end() {
        let buckets = bucket_series(
            &[point(d(2023, 12, 31), 7), point(d(2024, 2, 10), 3)],
            d(2023, 6, 15),
            d(2024, 2, 20),
        );
        assert_eq!(buckets.first().unwrap().label, "06/2023");
        assert_eq!(buckets.last().unwrap().label, "02/2024");
        assert_eq!(buckets.len(), 9);
        let dec = buckets.iter().find(|b| b.label == "12/2023").unwrap();
        assert_eq!(dec.value, Decimal::from(7));
    }

    #[test]
    fn test_sample_labels() {
        let labels: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
        let sampled = sample_labels(&labels, 4);
        let shown: Vec<&String> = sampled.iter().filter(|l| !l.is_empty()).collect();
        assert_eq!(shown, vec!["1", "4", "7", "10"]);
    }
}
