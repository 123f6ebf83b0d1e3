//! Site Content Models

use serde::{Deserialize, Serialize};

/// Where the banner caption sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerLayout {
    Left,
    Right,
    #[default]
    Center,
    /// Image only, caption hidden
    Full,
}

impl BannerLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Full => "full",
        }
    }
}

/// Home page banner slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub link: Option<String>,
    pub layout: BannerLayout,
    pub position: i32,
    pub is_active: bool,
}

/// Store information (singleton)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Receives completion notices; falls back to `email`
    pub contact_email: Option<String>,
    pub hotline: Option<String>,
    pub facebook: Option<String>,
    pub zalo: Option<String>,
    pub working_hours: Option<String>,
    pub about: String,
    pub logo: Option<String>,
}

impl SiteInfo {
    /// Address that should receive admin-side notices
    pub fn notice_address(&self) -> Option<&str> {
        self.contact_email
            .as_deref()
            .filter(|e| !e.is_empty())
            .or(Some(self.email.as_str()).filter(|e| !e.is_empty()))
    }
}
