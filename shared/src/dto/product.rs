//! Product DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryDto, DiscountDto, opt_bool_from_any};

/// Product as returned by `/api/products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default, alias = "quantity")]
    pub stock: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category: Option<CategoryDto>,
    #[serde(default)]
    pub discount: Option<DiscountDto>,
    #[serde(default, deserialize_with = "opt_bool_from_any")]
    pub out_of_stock: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create / update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: Option<i64>,
}

/// Inventory decrement request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDecrement {
    pub quantity: u32,
}

/// Inventory decrement response (remaining stock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    #[serde(alias = "quantity")]
    pub stock: i64,
}

/// Out-of-stock flag update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockFlag {
    pub out_of_stock: bool,
}
