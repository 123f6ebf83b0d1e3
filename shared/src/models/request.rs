//! Customer Request Model
//!
//! A request is either a product order or a repair ticket. Both share the
//! same status lifecycle on the admin board.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Column heading shown on the board
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "Mới",
            Self::InProgress => "Đang xử lý",
            Self::Completed => "Hoàn thành",
            Self::Cancelled => "Đã hủy",
        }
    }

    /// No further transitions out of these
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    /// Accepts the wire names plus the legacy spellings older records carry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" | "pending" => Ok(Self::New),
            "in_progress" | "in-progress" | "processing" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// Order vs repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Order,
    Repair,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Repair => "repair",
        }
    }
}

/// Customer contact fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
}

/// Order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestDetail {
    Order {
        items: Vec<OrderLine>,
        total: Decimal,
    },
    Repair {
        service_id: Option<i64>,
        problem: String,
        images: Vec<String>,
    },
}

/// Customer request tracked on the admin board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: i64,
    pub contact: Contact,
    pub detail: RequestDetail,
    pub status: RequestStatus,
    /// Archived (soft-deleted) requests only show in history
    pub hidden: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self.detail {
            RequestDetail::Order { .. } => RequestKind::Order,
            RequestDetail::Repair { .. } => RequestKind::Repair,
        }
    }

    /// Order lines, empty for repairs
    pub fn items(&self) -> &[OrderLine] {
        match &self.detail {
            RequestDetail::Order { items, .. } => items,
            RequestDetail::Repair { .. } => &[],
        }
    }
}

/// Filter for `/api/requests`
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub kind: Option<RequestKind>,
    pub status: Option<RequestStatus>,
    pub hidden: Option<bool>,
}

impl RequestFilter {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(kind) = self.kind {
            pairs.push(("type".to_string(), kind.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(hidden) = self.hidden {
            pairs.push(("hidden".to_string(), (hidden as u8).to_string()));
        }
        pairs
    }
}
