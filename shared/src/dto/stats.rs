//! Dashboard statistics DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenuePointDto {
    pub date: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProductDto {
    pub name: String,
    #[serde(alias = "sales", alias = "quantity")]
    pub sold: u64,
}

/// `/api/stats` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDto {
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_repairs: u64,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub pending_requests: u64,
    #[serde(default)]
    pub revenue: Vec<RevenuePointDto>,
    #[serde(default)]
    pub top_products: Vec<TopProductDto>,
}
