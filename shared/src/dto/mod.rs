//! Wire DTOs
//!
//! Loose shapes as the REST backend returns them. Dates stay strings,
//! money arrives as decimal strings or numbers, flags may be `0/1`.
//! Conversion into view models lives in `shop_client::mapper`.

pub mod auth;
pub mod category;
pub mod content;
pub mod discount;
pub mod product;
pub mod request;
pub mod review;
pub mod service;
pub mod stats;

pub use auth::*;
pub use category::*;
pub use content::*;
pub use discount::*;
pub use product::*;
pub use request::*;
pub use review::*;
pub use service::*;
pub use stats::*;

use serde::{Deserialize, Deserializer};

/// List responses come either as a bare array or wrapped with paging fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paged {
        #[serde(alias = "items", alias = "results")]
        data: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default, alias = "per_page", alias = "pageSize")]
        limit: Option<u32>,
    },
    Plain(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Drop paging info and keep the items
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paged { data, .. } => data,
            Self::Plain(items) => items,
        }
    }
}

/// Upload endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(alias = "path", alias = "file_url")]
    pub url: String,
}

/// Outgoing mail payload
#[derive(Debug, Clone, serde::Serialize)]
pub struct MailPayload {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl BoolLike {
    fn truthy(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Int(i) => i != 0,
            Self::Text(s) => matches!(s.as_str(), "1" | "true" | "TRUE" | "True"),
        }
    }
}

/// Accept `true`, `1` or `"1"`; null counts as false.
pub fn bool_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BoolLike>::deserialize(deserializer)?
        .map(BoolLike::truthy)
        .unwrap_or(false))
}

/// Same as [`bool_from_any`] but keeps absence distinguishable.
pub fn opt_bool_from_any<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BoolLike>::deserialize(deserializer)?.map(BoolLike::truthy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Flags {
        #[serde(default, deserialize_with = "bool_from_any")]
        hidden: bool,
        #[serde(default, deserialize_with = "opt_bool_from_any")]
        active: Option<bool>,
    }

    #[test]
    fn test_bool_from_int_and_text() {
        let f: Flags = serde_json::from_str(r#"{"hidden": 1, "active": "0"}"#).unwrap();
        assert!(f.hidden);
        assert_eq!(f.active, Some(false));

        let f: Flags = serde_json::from_str(r#"{"hidden": null}"#).unwrap();
        assert!(!f.hidden);
        assert_eq!(f.active, None);
    }

    #[test]
    fn test_list_envelope_shapes() {
        let plain: ListEnvelope<i64> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(plain.into_items(), vec![1, 2, 3]);

        let paged: ListEnvelope<i64> =
            serde_json::from_str(r#"{"items":[4],"total":9,"page":2,"per_page":1}"#).unwrap();
        match paged {
            ListEnvelope::Paged { data, total, page, limit } => {
                assert_eq!(data, vec![4]);
                assert_eq!(total, Some(9));
                assert_eq!(page, Some(2));
                assert_eq!(limit, Some(1));
            }
            ListEnvelope::Plain(_) => panic!("expected paged envelope"),
        }
    }
}
