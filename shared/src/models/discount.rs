//! Discount Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a discount applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DiscountScope {
    Product(i64),
    Service(i64),
    Category(i64),
    Global,
}

/// Time-windowed percentage reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: i64,
    pub name: String,
    /// Percentage in 0..=100
    pub sale_off: u8,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub scope: DiscountScope,
}
