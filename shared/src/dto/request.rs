//! Customer request DTOs (orders and repair tickets)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bool_from_any;
use crate::models::RequestStatus;

/// Order line as stored on a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestItemDto {
    pub product_id: i64,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Request as returned by `/api/requests`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDto {
    pub id: i64,
    /// "order" | "product" | "repair" | "service"
    #[serde(alias = "type")]
    pub request_type: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<RequestItemDto>>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default, alias = "problem")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "bool_from_any")]
    pub hidden: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// New product order submitted from checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequestPayload {
    #[serde(rename = "type")]
    pub request_type: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<RequestItemDto>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub note: Option<String>,
}

/// New repair ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairRequestPayload {
    #[serde(rename = "type")]
    pub request_type: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub service_id: Option<i64>,
    pub description: String,
    pub images: Vec<String>,
}

/// PATCH body for a status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: RequestStatus,
}

/// PATCH body for archiving / restoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenPatch {
    pub hidden: bool,
}

/// PUT body for the admin edit modal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
}
