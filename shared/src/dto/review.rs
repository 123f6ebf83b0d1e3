//! Review DTOs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDto {
    pub id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(alias = "author")]
    pub name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub product_id: Option<i64>,
    pub service_id: Option<i64>,
    pub name: String,
    pub rating: u8,
    pub comment: Option<String>,
}
