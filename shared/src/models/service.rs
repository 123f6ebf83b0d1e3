//! Repair Service Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Discount;

/// Repair service offering shown in the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    /// Free-form estimate, e.g. "2-3 ngày"
    pub duration: Option<String>,
    pub discount: Option<Discount>,
    pub created_at: Option<DateTime<Utc>>,
}
