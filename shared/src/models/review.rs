//! Review Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What was reviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ReviewTarget {
    Product(i64),
    Service(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub target: ReviewTarget,
    pub author: String,
    /// 1..=5
    pub rating: u8,
    pub comment: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Mean rating rounded to one decimal, `None` without reviews
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| r.rating as u32).sum();
    let mean = sum as f64 / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
