//! Discount campaign DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount record as returned by `/api/discounts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Percentage, e.g. 15 = 15%
    pub sale_off: Decimal,
    pub start_date: String,
    pub end_date: String,
    /// "product" | "service" | "category" | "all"
    #[serde(default, alias = "type")]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Create / update discount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountPayload {
    pub name: String,
    pub sale_off: u8,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub discount_type: String,
    pub product_id: Option<i64>,
    pub service_id: Option<i64>,
    pub category_id: Option<i64>,
}
