//! Repair service DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryDto, DiscountDto};

/// Repair service offering as returned by `/api/services`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category: Option<CategoryDto>,
    #[serde(default, alias = "estimated_time")]
    pub duration: Option<String>,
    #[serde(default)]
    pub discount: Option<DiscountDto>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create / update service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<i64>,
    pub duration: Option<String>,
}
