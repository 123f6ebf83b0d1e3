//! Site content DTOs (banners, store info)

use serde::{Deserialize, Serialize};

use super::opt_bool_from_any;

/// Home page banner slide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerDto {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
    /// "left" | "right" | "center" | "full"
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default, alias = "order")]
    pub position: Option<i32>,
    #[serde(default, deserialize_with = "opt_bool_from_any")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerPayload {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: String,
    pub link: Option<String>,
    pub layout: String,
    pub position: i32,
    pub is_active: bool,
}

/// Store information (`/api/info`), all fields optional on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteInfoDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Address that receives completion notices
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub hotline: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub zalo: Option<String>,
    #[serde(default)]
    pub working_hours: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}
