//! Category DTOs

use serde::{Deserialize, Serialize};

/// Category as returned by `/api/categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// "product" or "service"
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
}

/// Create / update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}
